//! Tracker site and catalog adapters for tvsub.
//!
//! - [`TrackerClient`]: search pages ([`tvsub_core::ListingSourcePort`]) and
//!   torrent downloads ([`tvsub_core::ArtifactFetcherPort`])
//! - [`HtmlDocumentParser`]: `scraper`-backed document query port used by the
//!   listing extractor
//! - [`DoubanClient`]: catalog titles and search ([`tvsub_core::CatalogPort`])

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod document;
mod douban;
mod error;
mod port;

use tvsub_core::{ListingExtractor, TrackerSite};

// ============================================================================
// Public API
// ============================================================================

pub use client::TrackerClient;
pub use config::{DoubanClientConfig, TrackerClientConfig};
pub use document::{HtmlDocument, HtmlDocumentParser};
pub use douban::DoubanClient;
pub use error::ClientBuildError;

/// Listing extractor for `site` backed by the HTML parser.
pub const fn html_listing_extractor(site: TrackerSite) -> ListingExtractor<HtmlDocumentParser> {
    ListingExtractor::new(HtmlDocumentParser::new(), site)
}

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use wiremock as _;
