//! Artifact fetcher port.
//!
//! Downloads one candidate's torrent file to a local path.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from fetching an artifact.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The candidate carries no download link.
    #[error("No download link")]
    MissingLink,

    /// Network or HTTP client failure.
    #[error("Transport error: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Download failed with status {status}: {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The server answered 200 with an empty body.
    #[error("Empty response body: {url}")]
    EmptyBody {
        /// The URL that was requested.
        url: String,
    },

    /// Writing the artifact failed.
    #[error("I/O error: {message}")]
    Io {
        /// Detailed error message.
        message: String,
    },
}

/// Port for downloading a single artifact.
///
/// Implementations must:
/// - fail on transport errors, non-success status or an empty body
/// - create parent directories of `destination` as needed
/// - remove any partially written file at `destination` before returning an error
///
/// Calling `fetch` twice downloads twice; the acquisition pipeline is
/// responsible for skipping artifacts that already exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactFetcherPort: Send + Sync {
    /// Download `url` to `destination`, returning the number of bytes written.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, FetchError>;
}
