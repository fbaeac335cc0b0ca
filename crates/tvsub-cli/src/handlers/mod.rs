//! Command handlers.
//!
//! Each handler takes what it needs (settings, context or the config path),
//! performs one command and prints the result.

pub mod config;
pub mod grab;
pub mod lookup;
pub mod run;
pub mod search;
pub mod watch;
