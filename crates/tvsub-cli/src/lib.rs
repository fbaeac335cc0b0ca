//! `tvsub` command-line front end.
//!
//! The binary in `main.rs` parses arguments and dispatches to [`handlers`].
//! [`bootstrap`] is the composition root: it is the only place where the
//! tracker, Transmission and webhook adapters are wired into the core
//! services.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use wiremock as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod scheduler;
pub mod watchlist_file;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, WatchCommand};
pub use error::CliError;
pub use parser::Cli;
pub use scheduler::Scheduler;
pub use watchlist_file::JsonWatchListRepository;
