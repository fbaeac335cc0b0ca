//! Webhook notification adapter for tvsub.
//!
//! [`WebhookNotifier`] implements [`tvsub_core::NotifierPort`] by posting
//! status events to a `send-message` endpoint.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod port;

pub use client::WebhookNotifier;
pub use config::WebhookConfig;
pub use error::ClientBuildError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use wiremock as _;
