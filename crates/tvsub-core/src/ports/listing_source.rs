//! Listing source port: fetches a tracker search page.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from discovering candidates for one watch-list entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    /// Missing or blank input, raised before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network or HTTP client failure.
    #[error("Search request failed: {message}")]
    Transport {
        /// Detailed error message.
        message: String,
    },

    /// The search page answered with a non-success status.
    #[error("Search request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

/// Port for retrieving the raw search-result document.
#[async_trait]
pub trait ListingSourcePort: Send + Sync {
    /// GET `url` with the opaque session `credential`, returning the body.
    async fn fetch_listing(&self, url: &str, credential: &str) -> Result<String, DiscoveryError>;
}
