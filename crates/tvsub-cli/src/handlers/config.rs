//! `tvsub config` handler.

use std::path::Path;

use anyhow::Result;
use tvsub_core::{Settings, validate_settings};

use crate::error::CliError;
use crate::presentation::mask_secret;

/// Print the effective configuration and report whether it is usable.
pub fn execute(config_path: &Path, settings: &Settings) -> Result<()> {
    println!("Configuration file: {}", config_path.display());
    println!("  endpoint:         {}", settings.endpoint);
    println!("  cookie:           {}", mask_secret(&settings.cookie));
    println!("  passkey:          {}", mask_secret(&settings.passkey));
    println!(
        "  interval:         {} minutes",
        settings.effective_interval_minutes()
    );
    println!("  site:             {}", settings.site().origin());
    println!("  artifact dir:     {}", settings.artifact_dir().display());
    println!("  watch-list:       {}", settings.watchlist_path().display());
    match settings.notify_target() {
        Some(target) => println!("  notifications:    {}", target.server),
        None => println!("  notifications:    disabled"),
    }

    validate_settings(settings).map_err(CliError::from)?;
    println!("Configuration OK");
    Ok(())
}
