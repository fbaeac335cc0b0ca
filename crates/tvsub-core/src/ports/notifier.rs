//! Notification port.
//!
//! Status events are delivered best-effort: the acquisition pipeline logs a
//! failed notification and moves on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where to deliver notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyTarget {
    /// Base URL of the message server.
    pub server: String,
    /// Access token for the message server.
    pub token: String,
}

impl NotifyTarget {
    /// Build a target if both parts are non-blank.
    pub fn from_parts(server: &str, token: &str) -> Option<Self> {
        let server = server.trim();
        let token = token.trim();
        if server.is_empty() || token.is_empty() {
            return None;
        }
        Some(Self {
            server: server.to_string(),
            token: token.to_string(),
        })
    }
}

/// A structured status event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Short headline.
    pub title: String,
    /// Message body.
    pub content: String,
    /// Optional extra detail (e.g. the release description).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StatusEvent {
    /// Create an event without detail.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            detail: None,
        }
    }

    /// Attach a detail string; empty strings are ignored.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if !detail.is_empty() {
            self.detail = Some(detail);
        }
        self
    }
}

/// Errors from delivering a notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// Server or token missing.
    #[error("Notification target not configured")]
    NotConfigured,

    /// Network failure.
    #[error("Notification transport error: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
    },

    /// Non-200 response.
    #[error("Notification server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The server reported `success: false`.
    #[error("Notification rejected: {reason}")]
    Rejected {
        /// Error reported by the server.
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid notification response: {message}")]
    InvalidResponse {
        /// Detailed error message.
        message: String,
    },
}

/// Port for emitting status events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Deliver `event` to `target`.
    async fn notify(&self, target: &NotifyTarget, event: &StatusEvent) -> Result<(), NotifyError>;
}

/// A notifier that drops every event.
///
/// Used when no webhook is configured and in tests that don't care about
/// notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl NoopNotifier {
    /// Create a new no-op notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifierPort for NoopNotifier {
    async fn notify(&self, _target: &NotifyTarget, _event: &StatusEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}
