//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core services expect from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `scraper` types in any signature
//! - Each port has its own error enum with string payloads, so outcomes can
//!   be cloned into batch reports and logged without borrowing the adapter
//! - Adapters map their internal errors to these at the boundary

pub mod artifact_fetcher;
pub mod catalog;
pub mod document;
pub mod download_agent;
pub mod listing_source;
pub mod notifier;
pub mod watchlist_repository;

pub use artifact_fetcher::{ArtifactFetcherPort, FetchError};
pub use catalog::{CatalogError, CatalogHit, CatalogPort};
pub use document::{AttrMatch, DocumentError, DocumentParser, DocumentQuery, NodePattern};
pub use download_agent::{AgentHandle, DownloadAgentPort, RegistrationError};
pub use listing_source::{DiscoveryError, ListingSourcePort};
pub use notifier::{NoopNotifier, NotifierPort, NotifyError, NotifyTarget, StatusEvent};
pub use watchlist_repository::{RepositoryError, WatchListRepository};

#[cfg(test)]
pub use artifact_fetcher::MockArtifactFetcherPort;
#[cfg(test)]
pub use download_agent::MockDownloadAgentPort;
#[cfg(test)]
pub use notifier::MockNotifierPort;

/// Per-run targets for the acquisition pipeline.
///
/// These are read from settings before every run so that edits to the
/// configuration file apply without rebuilding the adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionContext {
    /// Download agent endpoint handed to [`DownloadAgentPort::register`].
    pub agent_endpoint: String,
    /// Notification webhook target; `None` disables notifications.
    pub notify: Option<NotifyTarget>,
}

impl AcquisitionContext {
    /// Create a context with no notification target.
    pub fn new(agent_endpoint: impl Into<String>) -> Self {
        Self {
            agent_endpoint: agent_endpoint.into(),
            notify: None,
        }
    }

    /// Set the notification target.
    #[must_use]
    pub fn with_notify(mut self, target: NotifyTarget) -> Self {
        self.notify = Some(target);
        self
    }
}
