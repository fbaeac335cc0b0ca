//! Transmission RPC adapter for the tvsub download agent port.
//!
//! [`TransmissionAgent`] implements [`tvsub_core::DownloadAgentPort`] by
//! sending `torrent-add` with the base64-encoded torrent file. It handles the
//! `X-Transmission-Session-Id` handshake and takes HTTP basic auth
//! credentials from the endpoint URL.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod endpoint;
mod error;
mod port;
mod rpc;

pub use client::{TransmissionAgent, TransmissionConfig};
pub use error::ClientBuildError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use wiremock as _;
