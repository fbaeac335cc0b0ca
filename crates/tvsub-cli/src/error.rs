//! CLI-specific error types and exit codes.

use thiserror::Error;
use tvsub_core::{CatalogError, DiscoveryError, SettingsError, WatchListError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pipeline or adapter failure.
    #[error("{0}")]
    Core(String),

    /// Invalid user input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Watch-list store error.
    #[error("Watch-list error: {0}")]
    WatchList(String),

    /// External service (tracker, Douban, Transmission) error.
    #[error("External service error: {0}")]
    External(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::Io(_) => 74,        // EX_IOERR
            Self::Config(_) => 78,    // EX_CONFIG
            Self::WatchList(_) => 73, // EX_CANTCREAT
            Self::External(_) => 69,  // EX_UNAVAILABLE
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<WatchListError> for CliError {
    fn from(err: WatchListError) -> Self {
        match err {
            WatchListError::EmptyCatalogId => Self::Arguments(err.to_string()),
            WatchListError::Duplicate { .. } | WatchListError::NotFound { .. } => {
                Self::Core(err.to_string())
            }
            WatchListError::Repository(e) => Self::WatchList(e.to_string()),
        }
    }
}

impl From<DiscoveryError> for CliError {
    fn from(err: DiscoveryError) -> Self {
        match err {
            DiscoveryError::InvalidInput(msg) => Self::Arguments(msg),
            other => Self::External(other.to_string()),
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(msg) => Self::Arguments(msg),
            other => Self::External(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
