//! One pass over the watch-list: discovery, then acquisition, per entry.

use crate::domain::WatchEntry;
use crate::ports::{AcquisitionContext, DiscoveryError};

use super::acquisition::{AcquisitionPipeline, BatchReport};
use super::discovery::DiscoveryService;

/// Inputs that may change between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Tracker session cookie.
    pub credential: String,
    /// Download agent and notification targets.
    pub acquisition: AcquisitionContext,
}

impl RunContext {
    /// Create a run context.
    pub fn new(credential: impl Into<String>, acquisition: AcquisitionContext) -> Self {
        Self {
            credential: credential.into(),
            acquisition,
        }
    }
}

/// What happened to one watch-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The search failed; the entry was skipped.
    DiscoveryFailed(DiscoveryError),
    /// The search returned no candidates.
    NothingFound,
    /// Candidates were handed to the acquisition pipeline.
    Processed(BatchReport),
}

/// Report for one watch-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    /// The entry that was processed.
    pub entry: WatchEntry,
    /// What happened.
    pub outcome: EntryOutcome,
}

impl EntryReport {
    /// Whether discovery or any candidate failed.
    pub const fn has_failure(&self) -> bool {
        match &self.outcome {
            EntryOutcome::DiscoveryFailed(_) => true,
            EntryOutcome::NothingFound => false,
            EntryOutcome::Processed(batch) => batch.last_failure.is_some(),
        }
    }
}

/// Reports for every entry of a run, in watch-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-entry reports.
    pub entries: Vec<EntryReport>,
}

impl RunSummary {
    /// Total candidates registered across entries.
    pub fn succeeded(&self) -> usize {
        self.batches().map(BatchReport::succeeded).sum()
    }

    /// Total candidates skipped across entries.
    pub fn skipped(&self) -> usize {
        self.batches().map(BatchReport::skipped).sum()
    }

    /// Number of entries with a discovery or acquisition failure.
    pub fn entries_with_failures(&self) -> usize {
        self.entries.iter().filter(|r| r.has_failure()).count()
    }

    fn batches(&self) -> impl Iterator<Item = &BatchReport> {
        self.entries.iter().filter_map(|r| match &r.outcome {
            EntryOutcome::Processed(batch) => Some(batch),
            _ => None,
        })
    }
}

/// Drives discovery and acquisition for a list of entries.
pub struct SubscriptionRunner {
    discovery: DiscoveryService,
    pipeline: AcquisitionPipeline,
}

impl SubscriptionRunner {
    /// Create a runner.
    pub const fn new(discovery: DiscoveryService, pipeline: AcquisitionPipeline) -> Self {
        Self {
            discovery,
            pipeline,
        }
    }

    /// The acquisition pipeline, for single-candidate operations.
    pub const fn pipeline(&self) -> &AcquisitionPipeline {
        &self.pipeline
    }

    /// The discovery service, for search-only operations.
    pub const fn discovery(&self) -> &DiscoveryService {
        &self.discovery
    }

    /// Process `entries` sequentially. Failures are logged and never stop
    /// the run.
    pub async fn run(&self, entries: &[WatchEntry], context: &RunContext) -> RunSummary {
        tracing::info!(entries = entries.len(), "Processing watch-list");

        let mut summary = RunSummary::default();
        for entry in entries {
            summary.entries.push(self.run_entry(entry, context).await);
        }

        tracing::info!(
            succeeded = summary.succeeded(),
            skipped = summary.skipped(),
            failed_entries = summary.entries_with_failures(),
            "Watch-list processed"
        );
        summary
    }

    /// Process a single entry.
    pub async fn run_entry(&self, entry: &WatchEntry, context: &RunContext) -> EntryReport {
        let catalog_id = entry.catalog_id.as_str();
        tracing::info!(catalog_id, tier = %entry.quality_tier, name = entry.label(), "Processing entry");

        let outcome = match self.discovery.discover(entry, &context.credential).await {
            Err(e) => {
                tracing::warn!(catalog_id, error = %e, "Search failed");
                EntryOutcome::DiscoveryFailed(e)
            }
            Ok(candidates) if candidates.is_empty() => {
                tracing::info!(catalog_id, "No candidates found");
                EntryOutcome::NothingFound
            }
            Ok(candidates) => {
                tracing::info!(catalog_id, count = candidates.len(), "Found candidates");
                let batch = self.pipeline.run(&candidates, &context.acquisition).await;
                match &batch.last_failure {
                    Some(e) => tracing::warn!(catalog_id, error = %e, "Some candidates failed"),
                    None => tracing::info!(
                        catalog_id,
                        added = batch.succeeded(),
                        skipped = batch.skipped(),
                        "Candidates processed"
                    ),
                }
                EntryOutcome::Processed(batch)
            }
        };

        EntryReport {
            entry: entry.clone(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateRecord, QualityTier};
    use crate::listing::{CandidateExtractor, TrackerSite};
    use crate::ports::{
        AgentHandle, ArtifactFetcherPort, DownloadAgentPort, FetchError, ListingSourcePort,
        NoopNotifier, RegistrationError,
    };
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Search body is the catalog id; ids starting with `err` fail.
    struct EchoSource;

    #[async_trait]
    impl ListingSourcePort for EchoSource {
        async fn fetch_listing(&self, url: &str, _credential: &str) -> Result<String, DiscoveryError> {
            let search = url
                .split('&')
                .find_map(|p| p.strip_prefix("search="))
                .unwrap_or_default();
            if search.starts_with("err") {
                return Err(DiscoveryError::Status { status: 500 });
            }
            if search.starts_with("none") {
                return Ok(String::new());
            }
            Ok(format!("{search}-a\n{search}-b"))
        }
    }

    struct LineExtractor;

    impl CandidateExtractor for LineExtractor {
        fn extract(&self, document: &str) -> Vec<CandidateRecord> {
            document
                .lines()
                .map(|id| CandidateRecord::new(id).with_download_link(format!("https://t/{id}")))
                .collect()
        }
    }

    struct WritingFetcher;

    #[async_trait]
    impl ArtifactFetcherPort for WritingFetcher {
        async fn fetch(&self, _url: &str, destination: &Path) -> Result<u64, FetchError> {
            std::fs::create_dir_all(destination.parent().unwrap()).unwrap();
            std::fs::write(destination, b"d4:infoe").unwrap();
            Ok(8)
        }
    }

    struct AcceptingAgent;

    #[async_trait]
    impl DownloadAgentPort for AcceptingAgent {
        async fn register(&self, _endpoint: &str, _artifact: &Path) -> Result<AgentHandle, RegistrationError> {
            Ok(AgentHandle::named("show"))
        }
    }

    fn runner(dir: &TempDir) -> SubscriptionRunner {
        let discovery = DiscoveryService::new(
            Arc::new(EchoSource),
            Arc::new(LineExtractor),
            TrackerSite::default(),
        );
        let pipeline = AcquisitionPipeline::new(
            Arc::new(WritingFetcher),
            Arc::new(AcceptingAgent),
            Arc::new(NoopNotifier::new()),
            dir.path(),
        );
        SubscriptionRunner::new(discovery, pipeline)
    }

    fn context() -> RunContext {
        RunContext::new("uid=1", AcquisitionContext::new("http://localhost:9091"))
    }

    #[tokio::test]
    async fn test_run_continues_past_failing_entries() {
        let dir = TempDir::new().unwrap();
        let entries = [
            WatchEntry::new("err1", QualityTier::High),
            WatchEntry::new("none1", QualityTier::Standard),
            WatchEntry::new("42", QualityTier::Standard),
        ];

        let summary = runner(&dir).run(&entries, &context()).await;

        assert_eq!(summary.entries.len(), 3);
        assert!(matches!(
            summary.entries[0].outcome,
            EntryOutcome::DiscoveryFailed(DiscoveryError::Status { status: 500 })
        ));
        assert_eq!(summary.entries[1].outcome, EntryOutcome::NothingFound);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.entries_with_failures(), 1);
        assert!(dir.path().join("42-a.torrent").exists());
    }

    #[tokio::test]
    async fn test_second_run_skips_existing_artifacts() {
        let dir = TempDir::new().unwrap();
        let runner = runner(&dir);
        let entries = [WatchEntry::new("7", QualityTier::High)];

        let first = runner.run(&entries, &context()).await;
        let second = runner.run(&entries, &context()).await;

        assert_eq!(first.succeeded(), 2);
        assert_eq!(second.succeeded(), 0);
        assert_eq!(second.skipped(), 2);
    }
}
