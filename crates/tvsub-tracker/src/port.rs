//! Port trait implementations for the tracker and Douban clients.
//!
//! Converts internal `TrackerError`s to the core-owned port errors.

use std::path::Path;

use async_trait::async_trait;
use tvsub_core::{
    ArtifactFetcherPort, CatalogError, CatalogHit, CatalogPort, DiscoveryError, FetchError,
    ListingSourcePort,
};

use crate::client::TrackerClient;
use crate::douban::DoubanClient;
use crate::error::TrackerError;

// ============================================================================
// Error Mapping
// ============================================================================

fn to_discovery_error(err: TrackerError) -> DiscoveryError {
    match err {
        TrackerError::Status { status, .. } => DiscoveryError::Status { status },
        other => DiscoveryError::Transport {
            message: other.to_string(),
        },
    }
}

fn to_fetch_error(err: TrackerError) -> FetchError {
    match err {
        TrackerError::Status { status, url } => FetchError::Status { status, url },
        TrackerError::EmptyBody { url } => FetchError::EmptyBody { url },
        TrackerError::Io(e) => FetchError::Io {
            message: e.to_string(),
        },
        other => FetchError::Transport {
            message: other.to_string(),
        },
    }
}

fn to_catalog_error(err: TrackerError) -> CatalogError {
    match err {
        TrackerError::InvalidResponse { message } => CatalogError::InvalidResponse { message },
        TrackerError::JsonParse(e) => CatalogError::InvalidResponse {
            message: e.to_string(),
        },
        other => CatalogError::Request {
            message: other.to_string(),
        },
    }
}

// ============================================================================
// Tracker
// ============================================================================

#[async_trait]
impl ListingSourcePort for TrackerClient {
    async fn fetch_listing(&self, url: &str, credential: &str) -> Result<String, DiscoveryError> {
        self.get_listing(url, credential)
            .await
            .map_err(to_discovery_error)
    }
}

#[async_trait]
impl ArtifactFetcherPort for TrackerClient {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::MissingLink);
        }
        self.download(url, destination).await.map_err(to_fetch_error)
    }
}

// ============================================================================
// Douban
// ============================================================================

#[async_trait]
impl CatalogPort for DoubanClient {
    async fn lookup_title(&self, catalog_id: &str) -> Result<String, CatalogError> {
        let catalog_id = catalog_id.trim();
        if catalog_id.is_empty() {
            return Err(CatalogError::InvalidInput(
                "catalog id cannot be empty".to_string(),
            ));
        }

        self.subject_title(catalog_id)
            .await
            .map_err(to_catalog_error)?
            .ok_or_else(|| CatalogError::TitleNotFound {
                catalog_id: catalog_id.to_string(),
            })
    }

    async fn search(&self, name: &str) -> Result<Vec<CatalogHit>, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidInput(
                "search name cannot be empty".to_string(),
            ));
        }

        self.suggest(name).await.map_err(to_catalog_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_discovery_status() {
        let err = TrackerError::Status {
            status: 403,
            url: "u".to_string(),
        };
        assert_eq!(to_discovery_error(err), DiscoveryError::Status { status: 403 });
    }

    #[test]
    fn test_fetch_error_mapping() {
        assert_eq!(
            to_fetch_error(TrackerError::EmptyBody {
                url: "u".to_string()
            }),
            FetchError::EmptyBody {
                url: "u".to_string()
            }
        );
        assert!(matches!(
            to_fetch_error(TrackerError::Io(std::io::Error::other("disk"))),
            FetchError::Io { .. }
        ));
    }

    #[test]
    fn test_catalog_error_mapping() {
        assert!(matches!(
            to_catalog_error(TrackerError::InvalidResponse {
                message: "x".to_string()
            }),
            CatalogError::InvalidResponse { .. }
        ));
        assert!(matches!(
            to_catalog_error(TrackerError::Status {
                status: 500,
                url: "u".to_string()
            }),
            CatalogError::Request { .. }
        ));
    }
}
