//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where adapters are wired into the core
//! services:
//! - Tracker search and torrent downloads (via tvsub-tracker)
//! - Douban catalog lookups (via tvsub-tracker)
//! - Download agent registration (via tvsub-transmission)
//! - Status notifications (via tvsub-notify)
//!
//! The scheduler calls [`bootstrap`] once per cycle with freshly read
//! settings, so configuration edits apply to the next cycle.

use std::sync::Arc;

use tvsub_core::{
    AcquisitionPipeline, CatalogPort, DiscoveryService, RunContext, Settings, SubscriptionRunner,
    WatchListService,
};
use tvsub_notify::{WebhookConfig, WebhookNotifier};
use tvsub_tracker::{
    DoubanClient, DoubanClientConfig, TrackerClient, TrackerClientConfig, html_listing_extractor,
};
use tvsub_transmission::{TransmissionAgent, TransmissionConfig};

use crate::error::CliError;
use crate::watchlist_file::JsonWatchListRepository;

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Settings the context was built from.
    pub settings: Settings,
    /// Douban catalog client.
    pub catalog: Arc<DoubanClient>,
    /// Discovery plus acquisition over the watch-list.
    pub runner: SubscriptionRunner,
}

impl CliContext {
    /// Per-run inputs taken from the settings.
    pub fn run_context(&self) -> RunContext {
        RunContext::new(
            self.settings.cookie.trim(),
            self.settings.acquisition_context(),
        )
    }

    /// Load the watch-list named by the settings.
    pub async fn watchlist(&self) -> Result<WatchListService, CliError> {
        let repo = Arc::new(JsonWatchListRepository::new(
            self.settings.watchlist_path(),
        ));
        let catalog: Arc<dyn CatalogPort> = self.catalog.clone();
        Ok(WatchListService::load(repo, Some(catalog)).await?)
    }
}

/// Build a Douban client with default configuration.
pub fn catalog_client() -> Result<DoubanClient, CliError> {
    DoubanClient::new(&DoubanClientConfig::new()).map_err(|e| CliError::Core(e.to_string()))
}

/// Bootstrap the CLI context from `settings`.
///
/// Builds no connections; clients connect lazily on first request.
pub fn bootstrap(settings: Settings) -> Result<CliContext, CliError> {
    let site = settings.site();

    let tracker = Arc::new(
        TrackerClient::new(&TrackerClientConfig::new().with_cookie(settings.cookie.trim()))
            .map_err(|e| CliError::Core(e.to_string()))?,
    );
    let agent = Arc::new(
        TransmissionAgent::new(&TransmissionConfig::new())
            .map_err(|e| CliError::Core(e.to_string()))?,
    );
    let notifier = Arc::new(
        WebhookNotifier::new(&WebhookConfig::new()).map_err(|e| CliError::Core(e.to_string()))?,
    );
    let catalog = Arc::new(catalog_client()?);

    let discovery = DiscoveryService::new(
        tracker.clone(),
        Arc::new(html_listing_extractor(site.clone())),
        site,
    );
    let pipeline = AcquisitionPipeline::new(tracker, agent, notifier, settings.artifact_dir());

    Ok(CliContext {
        settings,
        catalog,
        runner: SubscriptionRunner::new(discovery, pipeline),
    })
}
