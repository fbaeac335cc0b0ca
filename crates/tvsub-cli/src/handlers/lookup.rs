//! `tvsub lookup` handler.

use anyhow::Result;
use tvsub_core::CatalogPort;

use crate::bootstrap::catalog_client;
use crate::error::CliError;
use crate::presentation::print_catalog_hits;

/// Search Douban titles by name. Needs no configuration.
pub async fn execute(name: &str) -> Result<()> {
    let hits = catalog_client()?
        .search(name)
        .await
        .map_err(CliError::from)?;
    print_catalog_hits(&hits);
    Ok(())
}
