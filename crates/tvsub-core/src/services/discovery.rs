//! Discovery: watch-list entry to candidate records.

use std::sync::Arc;

use crate::domain::{CandidateRecord, WatchEntry};
use crate::listing::{CandidateExtractor, TrackerSite};
use crate::ports::{DiscoveryError, ListingSourcePort};

/// Runs the tracker search for one entry and extracts its candidates.
pub struct DiscoveryService {
    source: Arc<dyn ListingSourcePort>,
    extractor: Arc<dyn CandidateExtractor>,
    site: TrackerSite,
}

impl DiscoveryService {
    /// Create a discovery service.
    pub fn new(
        source: Arc<dyn ListingSourcePort>,
        extractor: Arc<dyn CandidateExtractor>,
        site: TrackerSite,
    ) -> Self {
        Self {
            source,
            extractor,
            site,
        }
    }

    /// Search the tracker for `entry` using the session `credential`.
    ///
    /// Input is validated before any request is made. An empty result page
    /// yields an empty list.
    pub async fn discover(
        &self,
        entry: &WatchEntry,
        credential: &str,
    ) -> Result<Vec<CandidateRecord>, DiscoveryError> {
        let catalog_id = entry.catalog_id.trim();
        if catalog_id.is_empty() {
            return Err(DiscoveryError::InvalidInput(
                "catalog id cannot be empty".to_string(),
            ));
        }
        if credential.trim().is_empty() {
            return Err(DiscoveryError::InvalidInput(
                "session cookie cannot be empty".to_string(),
            ));
        }

        let url = self.site.search_url(catalog_id, entry.quality_tier);
        tracing::debug!(catalog_id, tier = %entry.quality_tier, %url, "Searching tracker");

        let body = self.source.fetch_listing(&url, credential).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.extractor.extract(&body);
        tracing::debug!(catalog_id, count = candidates.len(), "Extracted candidates");
        Ok(candidates)
    }
}
