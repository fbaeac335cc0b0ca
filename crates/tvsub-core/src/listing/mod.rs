//! Tracker search URLs and listing-page extraction.

mod extractor;
mod site;

pub use extractor::{CandidateExtractor, ListingExtractor, parse_detail_id};
pub use site::{DEFAULT_SITE_ORIGIN, TrackerSite};
