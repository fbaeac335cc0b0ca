//! `tvsub grab` handler.
//!
//! Acquires one torrent by id through the passkey download URL, bypassing
//! the search.

use anyhow::Result;
use tvsub_core::{AcquisitionOutcome, CandidateRecord, validate_settings};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_outcome;

/// Execute the grab command.
pub async fn execute(ctx: &CliContext, torrent_id: &str) -> Result<()> {
    let torrent_id = torrent_id.trim();
    if torrent_id.is_empty() {
        return Err(CliError::Arguments("torrent id cannot be empty".to_string()).into());
    }

    let settings = &ctx.settings;
    validate_settings(settings).map_err(CliError::from)?;
    if settings.passkey.trim().is_empty() {
        return Err(CliError::Config("passkey is not configured".to_string()).into());
    }

    let url = settings
        .site()
        .download_url(torrent_id, settings.passkey.trim());
    let candidate = CandidateRecord::new(torrent_id).with_download_link(url);

    let outcome = ctx
        .runner
        .pipeline()
        .acquire(&candidate, &settings.acquisition_context())
        .await;
    print_outcome(torrent_id, &outcome);

    if let AcquisitionOutcome::Failed(e) = outcome {
        return Err(CliError::Core(e.to_string()).into());
    }
    Ok(())
}
