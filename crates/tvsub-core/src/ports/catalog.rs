//! Catalog metadata port (Douban).
//!
//! Used to back-fill display names on the watch-list and to search titles
//! from the CLI. Never on the acquisition path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One catalog search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHit {
    /// Catalog id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Poster image URL.
    pub img: String,
    /// Release year.
    pub year: String,
    /// Episode info, if any.
    pub episode: String,
}

/// Errors from catalog lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Blank query or id.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network failure or non-success status.
    #[error("Catalog request failed: {message}")]
    Request {
        /// Detailed error message.
        message: String,
    },

    /// The page or payload did not contain what we need.
    #[error("Invalid catalog response: {message}")]
    InvalidResponse {
        /// Detailed error message.
        message: String,
    },

    /// No title could be found for the id.
    #[error("No title found for catalog id {catalog_id}")]
    TitleNotFound {
        /// The catalog id that was looked up.
        catalog_id: String,
    },
}

/// Port for catalog lookups.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Resolve a catalog id to its display title.
    async fn lookup_title(&self, catalog_id: &str) -> Result<String, CatalogError>;

    /// Search titles by name.
    async fn search(&self, name: &str) -> Result<Vec<CatalogHit>, CatalogError>;
}
