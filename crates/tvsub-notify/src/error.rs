//! Internal error types for webhook delivery.
//!
//! Mapped to `NotifyError` at the port boundary.

use thiserror::Error;

pub(crate) type WebhookResult<T> = Result<T, WebhookError>;

#[derive(Debug, Error)]
pub(crate) enum WebhookError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    /// `success` was false.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);
