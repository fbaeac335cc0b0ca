//! Download agent port definition.
//!
//! The download agent (Transmission) accepts a local torrent file and starts
//! the actual content transfer. The pipeline only needs to know whether
//! registration succeeded and, if so, a name to put in the notification.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifying handle returned by a successful registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHandle {
    /// Human-readable torrent name reported by the agent.
    pub name: String,
    /// Agent-assigned numeric id, if reported.
    pub id: Option<i64>,
    /// Info hash, if reported.
    pub hash: Option<String>,
    /// Whether the agent already had this torrent.
    pub duplicate: bool,
}

impl AgentHandle {
    /// Create a handle with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Errors from registering an artifact with the download agent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// The endpoint could not be parsed.
    #[error("Invalid agent endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The configured endpoint.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The artifact could not be read.
    #[error("Cannot read artifact: {message}")]
    Io {
        /// Detailed error message.
        message: String,
    },

    /// Network failure talking to the agent.
    #[error("Agent unreachable: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
    },

    /// The agent answered but refused the artifact.
    #[error("Agent rejected torrent: {reason}")]
    Rejected {
        /// Reason reported by the agent.
        reason: String,
    },
}

/// Port for handing a local artifact to the download agent.
///
/// Registration either returns a handle or fails with a reason; it must
/// never report success for a torrent the agent did not accept.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadAgentPort: Send + Sync {
    /// Register `artifact` with the agent reachable at `endpoint`.
    async fn register(&self, endpoint: &str, artifact: &Path)
    -> Result<AgentHandle, RegistrationError>;
}
