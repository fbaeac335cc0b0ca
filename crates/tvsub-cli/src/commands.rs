//! Commands enum and subcommands.

use clap::Subcommand;
use tvsub_core::QualityTier;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Process the watch-list now, then again on the configured interval
    Run {
        /// Process the watch-list once and exit
        #[arg(long)]
        once: bool,
        /// Only process these subscription ids (comma separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },

    /// Manage the watch-list
    #[command(subcommand)]
    Watch(WatchCommand),

    /// Search the tracker for a catalog id and print the candidates
    Search {
        /// Douban id to search for
        catalog_id: String,
        /// Quality tier: high/2160p or standard/1080p
        #[arg(short, long, default_value = "standard")]
        tier: QualityTier,
    },

    /// Download one torrent by id with the passkey URL and add it to Transmission
    Grab {
        /// Tracker torrent id
        torrent_id: String,
    },

    /// Search Douban titles by name
    Lookup {
        /// Title to search for
        name: String,
    },

    /// Print the effective configuration and check it
    Config,
}

/// Watch-list subcommands.
#[derive(Subcommand)]
pub enum WatchCommand {
    /// List subscriptions
    List,

    /// Add a subscription
    Add {
        /// Douban id
        catalog_id: String,
        /// Quality tier: high/2160p or standard/1080p
        #[arg(short, long, default_value = "standard")]
        tier: QualityTier,
        /// Display name (looked up on Douban when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove a subscription
    Remove {
        /// Douban id
        catalog_id: String,
        /// Quality tier: high/2160p or standard/1080p
        #[arg(short, long, default_value = "standard")]
        tier: QualityTier,
    },
}
