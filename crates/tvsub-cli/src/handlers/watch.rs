//! `tvsub watch` handlers.

use anyhow::Result;
use tvsub_core::{QualityTier, WatchEntry};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_watchlist;

/// List subscriptions.
pub async fn list(ctx: &CliContext) -> Result<()> {
    let watchlist = ctx.watchlist().await?;
    print_watchlist(&watchlist.list().await);
    Ok(())
}

/// Add a subscription. Without `name`, the title is looked up on Douban.
pub async fn add(
    ctx: &CliContext,
    catalog_id: &str,
    tier: QualityTier,
    name: Option<String>,
) -> Result<()> {
    let watchlist = ctx.watchlist().await?;

    let mut entry = WatchEntry::new(catalog_id, tier);
    if let Some(name) = name {
        entry = entry.with_display_name(name);
    }

    let added = watchlist.add(entry).await.map_err(CliError::from)?;
    println!(
        "Subscribed to '{}' ({}, {}) as {}",
        added.display_name, added.catalog_id, added.quality_tier, added.id
    );
    Ok(())
}

/// Remove a subscription.
pub async fn remove(ctx: &CliContext, catalog_id: &str, tier: QualityTier) -> Result<()> {
    let watchlist = ctx.watchlist().await?;
    let removed = watchlist
        .remove(catalog_id, tier)
        .await
        .map_err(CliError::from)?;
    println!(
        "Unsubscribed from '{}' ({}, {})",
        removed.label(),
        removed.catalog_id,
        removed.quality_tier
    );
    Ok(())
}
