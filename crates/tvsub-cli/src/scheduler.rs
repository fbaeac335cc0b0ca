//! Periodic watch-list processing.
//!
//! Every cycle re-reads the configuration file and rebuilds the adapters, so
//! edits to cookie, endpoint, interval or watch-list take effect without a
//! restart. Cycles are serialized through a single-flight gate.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tvsub_core::{RunSummary, Settings, WatchEntry, validate_settings};

use crate::bootstrap::bootstrap;
use crate::config::load_settings;
use crate::error::CliError;

/// Drives discovery and acquisition over the watch-list.
pub struct Scheduler {
    config_path: PathBuf,
    gate: Mutex<()>,
}

impl Scheduler {
    /// Scheduler reading its settings from `config_path`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            gate: Mutex::new(()),
        }
    }

    /// Process the watch-list once. `only` restricts the run to the given
    /// subscription ids; empty means every entry.
    ///
    /// Waits for any cycle already in progress.
    pub async fn run_once(&self, only: &[String]) -> Result<RunSummary, CliError> {
        let _guard = self.gate.lock().await;
        let settings = load_settings(&self.config_path).await?;
        run_cycle(settings, only).await
    }

    /// Run immediately, then every `interval_minutes` until Ctrl-C.
    ///
    /// The first cycle must succeed. Later cycle errors are logged and the
    /// previous interval is kept. Ctrl-C during a cycle lets it finish.
    pub async fn run_forever(&self, only: &[String]) -> Result<(), CliError> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(true);
            }
        });

        let mut minutes = self.tick(only).await?;
        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            tracing::info!(minutes, "Next run scheduled");
            tokio::select! {
                _ = shutdown_rx.changed() => break,
                () = tokio::time::sleep(cycle_delay(minutes)) => {}
            }

            match self.tick(only).await {
                Ok(next) => minutes = next,
                Err(e) => tracing::error!(error = %e, "Scheduled run failed"),
            }
        }

        tracing::info!("Shutting down");
        Ok(())
    }

    async fn tick(&self, only: &[String]) -> Result<u64, CliError> {
        let _guard = self.gate.lock().await;
        let settings = load_settings(&self.config_path).await?;
        let minutes = settings.effective_interval_minutes();
        run_cycle(settings, only).await?;
        Ok(minutes)
    }
}

/// Wait between cycles. Saturates instead of overflowing on absurd intervals.
fn cycle_delay(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

async fn run_cycle(settings: Settings, only: &[String]) -> Result<RunSummary, CliError> {
    validate_settings(&settings)?;
    let ctx = bootstrap(settings)?;
    let watchlist = ctx.watchlist().await?;

    let entries = select_entries(watchlist.list().await, only);
    if entries.is_empty() {
        tracing::info!("Nothing to process");
    }

    Ok(ctx.runner.run(&entries, &ctx.run_context()).await)
}

/// Entries whose subscription id is in `only`, in watch-list order. Empty
/// `only` keeps every entry.
pub fn select_entries(entries: Vec<WatchEntry>, only: &[String]) -> Vec<WatchEntry> {
    if only.is_empty() {
        return entries;
    }

    for id in only {
        if !entries.iter().any(|e| &e.id == id) {
            tracing::warn!(id = %id, "Unknown subscription id");
        }
    }

    entries
        .into_iter()
        .filter(|e| only.contains(&e.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tvsub_core::QualityTier;

    fn entries() -> Vec<WatchEntry> {
        vec![
            WatchEntry::new("1", QualityTier::High).with_id("a"),
            WatchEntry::new("2", QualityTier::Standard).with_id("b"),
            WatchEntry::new("3", QualityTier::Standard).with_id("c"),
        ]
    }

    #[test]
    fn test_select_all_when_unfiltered() {
        assert_eq!(select_entries(entries(), &[]).len(), 3);
    }

    #[test]
    fn test_select_keeps_watchlist_order() {
        let only = vec!["c".to_string(), "a".to_string(), "zzz".to_string()];
        let selected = select_entries(entries(), &only);
        let ids: Vec<_> = selected.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_cycle_delay_saturates() {
        assert_eq!(cycle_delay(60), Duration::from_secs(3600));
        assert_eq!(cycle_delay(u64::MAX), Duration::from_secs(u64::MAX));
    }

    #[tokio::test]
    async fn test_run_once_rejects_incomplete_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"endpoint":"http://nas:9091"}"#).unwrap();

        let result = Scheduler::new(&path).run_once(&[]).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_once_with_empty_watchlist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let watchlist = dir.path().join("subscribes.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "endpoint": "http://127.0.0.1:9/transmission/rpc",
                "cookie": "uid=1",
                "watchlist_path": watchlist,
            })
            .to_string(),
        )
        .unwrap();

        let summary = Scheduler::new(&path).run_once(&[]).await.unwrap();
        assert!(summary.entries.is_empty());
    }
}
