//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, store
//! management, and output formatting.

use crate::error::CliError;
use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;
use std::time::Duration;
use tablebook::store::STORE_FILE_NAME;
use tablebook::{Config, ConfigBuilder, Logger, ReservationStore, StoreConfig};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic store initialization.
    pub disable_autoinit: bool,

    /// Logger for user-facing status messages, at the resolved verbosity.
    pub logger: Logger,
}

/// Resolve the data directory.
///
/// Priority: `--data-dir` > `TABLEBOOK_DATA_DIR` > `~/.tablebook`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => tablebook::store::resolve_data_dir().map_err(CliError::from),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the reservation store with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the store doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<ReservationStore, CliError> {
    let store_path = resolve_data_dir(global)?.join(STORE_FILE_NAME);
    let autoinit_disabled = global.disable_autoinit || config.autoinit_disabled();

    if !store_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let busy_timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => Duration::from_secs(config.lock_wait_seconds()),
    };

    let store_config = StoreConfig::new(store_path)
        .with_busy_timeout(busy_timeout)
        .with_auto_create(!autoinit_disabled);

    ReservationStore::open(store_config).map_err(CliError::from)
}

/// Format a millisecond timestamp for display in local time.
///
/// Falls back to the raw number when it is out of range.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(data_dir: Option<PathBuf>) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            quiet: false,
            data_dir,
            busy_timeout: None,
            disable_autoinit: false,
            logger: Logger::default(),
        }
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/tablebook-explicit");
        assert_eq!(resolve_data_dir(&global(Some(dir.clone()))).unwrap(), dir);
    }

    #[test]
    fn test_open_store_without_autoinit() {
        let temp = tempfile::tempdir().unwrap();
        let mut options = global(Some(temp.path().join("absent")));
        options.disable_autoinit = true;

        let err = open_store(&options, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoDataDirectory));
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
        assert_eq!(format_timestamp(0).len(), "1970-01-01 00:00:00".len());
    }
}
