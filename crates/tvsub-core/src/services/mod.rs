//! Core services - the pipeline and watch-list orchestration.
//!
//! Services here only talk to ports; concrete adapters are injected by the
//! CLI's composition root.

mod acquisition;
mod discovery;
mod runner;
mod watchlist;

pub use acquisition::{
    AcquisitionError, AcquisitionOutcome, AcquisitionPipeline, BatchReport, CandidateOutcome,
};
pub use discovery::DiscoveryService;
pub use runner::{EntryOutcome, EntryReport, RunContext, RunSummary, SubscriptionRunner};
pub use watchlist::{WatchListError, WatchListService};
