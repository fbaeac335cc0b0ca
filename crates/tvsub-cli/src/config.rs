//! Configuration file loading.

use std::path::Path;

use tvsub_core::Settings;

use crate::error::CliError;

/// Configuration file used when neither `--config` nor `TVSUB_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Read and parse the settings file.
///
/// The file must exist. Validation of required fields is left to the
/// commands that need them.
pub async fn load_settings(path: &Path) -> Result<Settings, CliError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::Config(format!(
            "cannot read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let settings = Settings::from_json(&text)?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(settings)
}
