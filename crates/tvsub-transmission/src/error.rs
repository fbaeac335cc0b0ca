//! Internal error types for Transmission RPC operations.
//!
//! Mapped to `RegistrationError` at the port boundary.

use thiserror::Error;

/// Result type alias for Transmission operations.
pub(crate) type TransmissionResult<T> = Result<T, TransmissionError>;

#[derive(Debug, Error)]
pub(crate) enum TransmissionError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("Cannot read torrent file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status other than the session handshake.
    #[error("RPC request failed with status {0}")]
    Status(u16),

    /// 409 returned without a session id, or twice in a row.
    #[error("Session handshake failed")]
    Handshake,

    /// `result` was not "success".
    #[error("{0}")]
    Rpc(String),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);
