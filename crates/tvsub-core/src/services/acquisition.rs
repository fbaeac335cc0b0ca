//! Acquisition pipeline: candidate records to registered torrents.
//!
//! For each candidate the pipeline skips artifacts that already exist
//! locally, otherwise fetches the torrent file, registers it with the
//! download agent and reports the outcome through the notifier. A failure on
//! one candidate never stops the batch.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::CandidateRecord;
use crate::paths::artifact_path;
use crate::ports::{
    AcquisitionContext, AgentHandle, ArtifactFetcherPort, DownloadAgentPort, FetchError,
    NotifierPort, RegistrationError, StatusEvent,
};

const TITLE_FETCH_FAILED: &str = "Torrent download failed";
const TITLE_REGISTRATION_FAILED: &str = "Torrent registration failed";
const TITLE_ADDED: &str = "Torrent added";

/// Why a single candidate could not be acquired.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AcquisitionError {
    /// The candidate carries no download link.
    #[error("Torrent {id} has no download link")]
    MissingDownloadLink {
        /// Candidate id.
        id: String,
    },

    /// The candidate id cannot be used as a file name.
    #[error("Torrent id '{id}' cannot be stored as a file")]
    InvalidCandidateId {
        /// Candidate id.
        id: String,
    },

    /// Downloading the torrent file failed.
    #[error("Failed to download torrent {id}: {source}")]
    Fetch {
        /// Candidate id.
        id: String,
        /// Underlying fetch error.
        source: FetchError,
    },

    /// The download agent did not accept the torrent.
    #[error("Failed to add torrent {id} to the download agent: {source}")]
    Registration {
        /// Candidate id.
        id: String,
        /// Underlying registration error.
        source: RegistrationError,
    },
}

impl AcquisitionError {
    /// Id of the candidate that failed.
    pub fn candidate_id(&self) -> &str {
        match self {
            Self::MissingDownloadLink { id }
            | Self::InvalidCandidateId { id }
            | Self::Fetch { id, .. }
            | Self::Registration { id, .. } => id,
        }
    }
}

/// Result of processing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// The artifact already existed locally; nothing was done.
    Skipped,
    /// Fetched and registered.
    Succeeded(AgentHandle),
    /// Fetch or registration failed.
    Failed(AcquisitionError),
}

/// Outcome paired with the candidate it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateOutcome {
    /// Candidate id.
    pub candidate_id: String,
    /// What happened.
    pub outcome: AcquisitionOutcome,
}

/// Aggregate result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Per-candidate outcomes in input order.
    pub outcomes: Vec<CandidateOutcome>,
    /// The most recent failure, if any.
    pub last_failure: Option<AcquisitionError>,
}

impl BatchReport {
    fn record(&mut self, candidate_id: &str, outcome: AcquisitionOutcome) {
        if let AcquisitionOutcome::Failed(error) = &outcome {
            self.last_failure = Some(error.clone());
        }
        self.outcomes.push(CandidateOutcome {
            candidate_id: candidate_id.to_string(),
            outcome,
        });
    }

    /// Number of candidates that were registered.
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Succeeded(_)))
    }

    /// Number of candidates skipped because they already existed.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Skipped))
    }

    /// Number of candidates that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AcquisitionOutcome::Failed(_)))
    }

    /// `Ok` when no candidate failed, otherwise the last failure.
    pub fn into_result(self) -> Result<Self, AcquisitionError> {
        match self.last_failure {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }

    fn count(&self, pred: impl Fn(&AcquisitionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|c| pred(&c.outcome)).count()
    }
}

/// Orchestrates fetcher, download agent and notifier for a batch of
/// candidates.
pub struct AcquisitionPipeline {
    fetcher: Arc<dyn ArtifactFetcherPort>,
    agent: Arc<dyn DownloadAgentPort>,
    notifier: Arc<dyn NotifierPort>,
    artifact_dir: PathBuf,
}

impl AcquisitionPipeline {
    /// Create a pipeline storing artifacts under `artifact_dir`.
    pub fn new(
        fetcher: Arc<dyn ArtifactFetcherPort>,
        agent: Arc<dyn DownloadAgentPort>,
        notifier: Arc<dyn NotifierPort>,
        artifact_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            agent,
            notifier,
            artifact_dir: artifact_dir.into(),
        }
    }

    /// Directory where artifacts are stored.
    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// Process `candidates` in order.
    ///
    /// Never fails as a whole; inspect [`BatchReport::last_failure`].
    pub async fn run(
        &self,
        candidates: &[CandidateRecord],
        context: &AcquisitionContext,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for candidate in candidates {
            let outcome = self.acquire(candidate, context).await;
            if let AcquisitionOutcome::Failed(error) = &outcome {
                tracing::warn!(torrent_id = %candidate.id, error = %error, "Acquisition failed");
            }
            report.record(&candidate.id, outcome);
        }

        tracing::debug!(
            succeeded = report.succeeded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Acquisition batch finished"
        );
        report
    }

    /// Process a single candidate.
    pub async fn acquire(
        &self,
        candidate: &CandidateRecord,
        context: &AcquisitionContext,
    ) -> AcquisitionOutcome {
        let id = candidate.id.as_str();

        let Some(path) = artifact_path(&self.artifact_dir, id) else {
            let error = AcquisitionError::InvalidCandidateId { id: id.to_string() };
            self.report_failure(TITLE_FETCH_FAILED, &error, context).await;
            return AcquisitionOutcome::Failed(error);
        };

        if tokio::fs::metadata(&path).await.is_ok() {
            tracing::debug!(torrent_id = %id, path = %path.display(), "Artifact exists, skipping");
            return AcquisitionOutcome::Skipped;
        }

        if let Err(error) = self.fetch(candidate, &path).await {
            remove_artifact(&path).await;
            self.report_failure(TITLE_FETCH_FAILED, &error, context).await;
            return AcquisitionOutcome::Failed(error);
        }

        match self.agent.register(&context.agent_endpoint, &path).await {
            Ok(handle) => {
                tracing::info!(torrent_id = %id, name = %handle.name, "Torrent added");
                let content = format!(
                    "Name: {}\nTorrent id: {id}\nAdded to the download agent",
                    handle.name
                );
                let event =
                    StatusEvent::new(TITLE_ADDED, content).with_detail(candidate.description.clone());
                self.notify(&event, context).await;
                AcquisitionOutcome::Succeeded(handle)
            }
            Err(source) => {
                remove_artifact(&path).await;
                let error = AcquisitionError::Registration {
                    id: id.to_string(),
                    source,
                };
                self.report_failure(TITLE_REGISTRATION_FAILED, &error, context).await;
                AcquisitionOutcome::Failed(error)
            }
        }
    }

    async fn fetch(&self, candidate: &CandidateRecord, path: &Path) -> Result<u64, AcquisitionError> {
        let link = candidate.download_link.trim();
        if link.is_empty() {
            return Err(AcquisitionError::MissingDownloadLink {
                id: candidate.id.clone(),
            });
        }

        let bytes = self
            .fetcher
            .fetch(link, path)
            .await
            .map_err(|source| AcquisitionError::Fetch {
                id: candidate.id.clone(),
                source,
            })?;
        tracing::debug!(torrent_id = %candidate.id, bytes, "Artifact fetched");
        Ok(bytes)
    }

    async fn report_failure(
        &self,
        title: &str,
        error: &AcquisitionError,
        context: &AcquisitionContext,
    ) {
        let content = format!("Torrent id: {}\nError: {error}", error.candidate_id());
        self.notify(&StatusEvent::new(title, content), context).await;
    }

    /// Deliver `event` if a target is configured. Failures are logged only.
    async fn notify(&self, event: &StatusEvent, context: &AcquisitionContext) {
        let Some(target) = &context.notify else {
            tracing::debug!(title = %event.title, "No notification target configured");
            return;
        };

        if let Err(e) = self.notifier.notify(target, event).await {
            tracing::warn!(title = %event.title, error = %e, "Failed to send notification");
        }
    }
}

/// Remove an artifact, ignoring a missing file.
async fn remove_artifact(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed artifact"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove artifact"),
    }
}
