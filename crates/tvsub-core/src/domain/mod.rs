//! Domain types for the watch-list and discovered candidates.
//!
//! These are pure data types with no infrastructure dependencies.

mod candidate;
mod watch;

pub use candidate::CandidateRecord;
pub use watch::{QualityTier, WatchEntry};
