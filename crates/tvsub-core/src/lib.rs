//! Core domain types, port definitions and pipeline services for tvsub.
//!
//! This crate owns everything that does not talk to the outside world:
//! the watch-list and candidate types, the search URL builder, the listing
//! extractor (over an injected document query port), and the discovery and
//! acquisition services. Adapter crates implement the ports defined in
//! [`ports`]; the CLI wires them together.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod listing;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{CandidateRecord, QualityTier, WatchEntry};
pub use listing::{
    CandidateExtractor, DEFAULT_SITE_ORIGIN, ListingExtractor, TrackerSite, parse_detail_id,
};
pub use paths::{DEFAULT_ARTIFACT_DIR, artifact_path};
pub use ports::{
    AcquisitionContext, AgentHandle, ArtifactFetcherPort, CatalogError, CatalogHit, CatalogPort,
    DiscoveryError, DocumentError, DocumentParser, DocumentQuery, DownloadAgentPort, FetchError,
    ListingSourcePort, NodePattern, NoopNotifier, NotifierPort, NotifyError, NotifyTarget,
    RegistrationError, RepositoryError, StatusEvent, WatchListRepository,
};
pub use services::{
    AcquisitionError, AcquisitionOutcome, AcquisitionPipeline, BatchReport, CandidateOutcome,
    DiscoveryService, EntryOutcome, EntryReport, RunContext, RunSummary, SubscriptionRunner,
    WatchListError, WatchListService,
};
pub use settings::{
    DEFAULT_INTERVAL_MINUTES, DEFAULT_WATCHLIST_PATH, Settings, SettingsError, validate_settings,
};
