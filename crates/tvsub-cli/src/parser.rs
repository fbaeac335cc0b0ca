//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;
use crate::config::DEFAULT_CONFIG_PATH;

/// Subscribe to TV releases on a private tracker and hand them to
/// Transmission.
#[derive(Parser)]
#[command(name = "tvsub")]
#[command(about = "Subscribe to TV releases and send new torrents to Transmission")]
#[command(version)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(
        short = 'c',
        long = "config",
        env = "TVSUB_CONFIG",
        default_value = DEFAULT_CONFIG_PATH,
        global = true
    )]
    pub config: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
