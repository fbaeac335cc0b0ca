//! Watch-list persistence port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::WatchEntry;

/// Errors from the watch-list store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Storage backend error (filesystem, permissions).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for loading and saving the whole watch-list.
#[async_trait]
pub trait WatchListRepository: Send + Sync {
    /// Load every entry. A missing or empty store yields an empty list.
    async fn load(&self) -> Result<Vec<WatchEntry>, RepositoryError>;

    /// Replace the stored list with `entries`.
    async fn save(&self, entries: &[WatchEntry]) -> Result<(), RepositoryError>;
}
