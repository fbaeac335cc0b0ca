//! `tvsub search` handler.

use anyhow::Result;
use tvsub_core::{QualityTier, WatchEntry};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_candidates;

/// Search the tracker and print candidates without downloading anything.
pub async fn execute(ctx: &CliContext, catalog_id: &str, tier: QualityTier) -> Result<()> {
    let entry = WatchEntry::new(catalog_id, tier);
    let candidates = ctx
        .runner
        .discovery()
        .discover(&entry, ctx.settings.cookie.trim())
        .await
        .map_err(CliError::from)?;

    print_candidates(&candidates);
    Ok(())
}
