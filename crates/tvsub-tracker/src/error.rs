//! Error types for tracker and catalog operations.
//!
//! `TrackerError` is internal to `tvsub-tracker` and is mapped to core port
//! errors at the boundary (see `port.rs`).

use thiserror::Error;

/// Result type alias for tracker operations.
pub(crate) type TrackerResult<T> = Result<T, TrackerError>;

/// Errors related to tracker and catalog HTTP operations.
#[derive(Debug, Error)]
pub(crate) enum TrackerError {
    /// Request failed with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// A download answered 200 with no body.
    #[error("Empty response body: {url}")]
    EmptyBody {
        /// The URL that was requested
        url: String,
    },

    /// The response did not contain what we expected.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Filesystem error while writing an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("Failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = TrackerError::Status {
            status: 403,
            url: "https://springsunday.net/torrents.php".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("springsunday.net"));
    }

    #[test]
    fn test_empty_body_error_message() {
        let error = TrackerError::EmptyBody {
            url: "https://t/download.php?id=1".to_string(),
        };
        assert!(error.to_string().contains("Empty response body"));
    }
}
