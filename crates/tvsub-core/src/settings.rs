//! Settings domain types and validation.
//!
//! `Settings` mirrors the JSON configuration file. Loading the file is the
//! CLI's job; this module only knows the shape, the defaults and what makes a
//! configuration usable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::listing::{DEFAULT_SITE_ORIGIN, TrackerSite};
use crate::paths::DEFAULT_ARTIFACT_DIR;
use crate::ports::{AcquisitionContext, NotifyTarget};

/// Minutes between scheduled runs when the configured value is missing or
/// not positive.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 60;

/// Watch-list file used when the configuration does not override it.
pub const DEFAULT_WATCHLIST_PATH: &str = "subscribes.json";

/// Application settings, as read from `config.json`.
///
/// Every field may be absent from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Download agent (Transmission RPC) endpoint.
    pub endpoint: String,

    /// Tracker session cookie, forwarded verbatim.
    pub cookie: String,

    /// Tracker passkey for legacy download URLs.
    pub passkey: String,

    /// Minutes between scheduled runs.
    pub interval_minutes: i64,

    /// Base URL of the notification webhook server.
    pub wechat_server: String,

    /// Access token for the notification webhook.
    pub wechat_token: String,

    /// Tracker site origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_origin: Option<String>,

    /// Directory for downloaded torrent files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_dir: Option<String>,

    /// Watch-list file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchlist_path: Option<String>,
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Interval between scheduled runs in minutes (with default fallback).
    #[must_use]
    pub fn effective_interval_minutes(&self) -> u64 {
        u64::try_from(self.interval_minutes)
            .ok()
            .filter(|&m| m > 0)
            .unwrap_or(DEFAULT_INTERVAL_MINUTES)
    }

    /// The tracker site (with default origin fallback).
    pub fn site(&self) -> TrackerSite {
        TrackerSite::new(non_blank(self.site_origin.as_deref()).unwrap_or(DEFAULT_SITE_ORIGIN))
    }

    /// Artifact directory (with default fallback).
    pub fn artifact_dir(&self) -> PathBuf {
        PathBuf::from(non_blank(self.artifact_dir.as_deref()).unwrap_or(DEFAULT_ARTIFACT_DIR))
    }

    /// Watch-list file (with default fallback).
    pub fn watchlist_path(&self) -> PathBuf {
        PathBuf::from(non_blank(self.watchlist_path.as_deref()).unwrap_or(DEFAULT_WATCHLIST_PATH))
    }

    /// Notification target, if both server and token are set.
    pub fn notify_target(&self) -> Option<NotifyTarget> {
        NotifyTarget::from_parts(&self.wechat_server, &self.wechat_token)
    }

    /// Per-run acquisition targets derived from these settings.
    pub fn acquisition_context(&self) -> AcquisitionContext {
        let context = AcquisitionContext::new(self.endpoint.trim());
        match self.notify_target() {
            Some(target) => context.with_notify(target),
            None => context,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Settings loading and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid configuration file: {0}")]
    Parse(String),

    #[error("Cookie is not configured")]
    MissingCookie,

    #[error("Download agent endpoint is not configured")]
    MissingEndpoint,
}

/// Validate that the settings can drive a run.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.cookie.trim().is_empty() {
        return Err(SettingsError::MissingCookie);
    }

    if settings.endpoint.trim().is_empty() {
        return Err(SettingsError::MissingEndpoint);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Settings {
        Settings {
            endpoint: "http://localhost:9091/transmission/rpc".to_string(),
            cookie: "c_secure_uid=1".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_from_json_with_missing_fields() {
        let settings = Settings::from_json(r#"{"cookie":"abc","interval_minutes":15}"#).unwrap();
        assert_eq!(settings.cookie, "abc");
        assert_eq!(settings.effective_interval_minutes(), 15);
        assert!(settings.endpoint.is_empty());
        assert_eq!(settings.site_origin, None);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_interval_defaults() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_interval_minutes(), DEFAULT_INTERVAL_MINUTES);
        settings.interval_minutes = -5;
        assert_eq!(settings.effective_interval_minutes(), DEFAULT_INTERVAL_MINUTES);
        settings.interval_minutes = 30;
        assert_eq!(settings.effective_interval_minutes(), 30);
    }

    #[test]
    fn test_path_and_site_defaults() {
        let mut settings = Settings::default();
        assert_eq!(settings.artifact_dir(), PathBuf::from("torrents"));
        assert_eq!(settings.watchlist_path(), PathBuf::from("subscribes.json"));
        assert_eq!(settings.site().origin(), "https://springsunday.net");

        settings.artifact_dir = Some("  ".to_string());
        assert_eq!(settings.artifact_dir(), PathBuf::from("torrents"));

        settings.site_origin = Some("https://tracker.example/".to_string());
        assert_eq!(settings.site().origin(), "https://tracker.example");
    }

    #[test]
    fn test_acquisition_context() {
        let mut settings = valid();
        let context = settings.acquisition_context();
        assert_eq!(context.agent_endpoint, "http://localhost:9091/transmission/rpc");
        assert!(context.notify.is_none());

        settings.wechat_server = "http://msg.local".to_string();
        settings.wechat_token = "tok".to_string();
        let context = settings.acquisition_context();
        assert_eq!(context.notify.unwrap().server, "http://msg.local");
    }

    #[test]
    fn test_validate_settings() {
        assert!(validate_settings(&valid()).is_ok());

        let mut settings = valid();
        settings.cookie = "  ".to_string();
        assert_eq!(validate_settings(&settings), Err(SettingsError::MissingCookie));

        let mut settings = valid();
        settings.endpoint.clear();
        assert_eq!(validate_settings(&settings), Err(SettingsError::MissingEndpoint));
    }
}
