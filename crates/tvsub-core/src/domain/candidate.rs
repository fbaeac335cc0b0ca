//! Candidate records parsed from a tracker listing page.

use serde::{Deserialize, Serialize};

/// One parsed search-result row representing a potentially downloadable item.
///
/// Produced fresh by each extraction call and never persisted. Within one
/// extraction result, `id` is unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Site-assigned torrent id, treated as an opaque token.
    pub id: String,
    /// Longest human-readable label found in the row (may be empty).
    pub description: String,
    /// Absolute download URL (may be empty).
    pub download_link: String,
    /// Free-text size such as `"45.3 GB"` (may be empty).
    pub size_label: String,
}

impl CandidateRecord {
    /// Create a record with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the download link.
    #[must_use]
    pub fn with_download_link(mut self, link: impl Into<String>) -> Self {
        self.download_link = link.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the size label.
    #[must_use]
    pub fn with_size_label(mut self, size: impl Into<String>) -> Self {
        self.size_label = size.into();
        self
    }
}
