//! Configuration schema definitions.
//!
//! This module defines the configuration file structure for tablebook.

use serde::{Deserialize, Serialize};

use crate::reservation::ReservationStatus;

/// Default number of seconds to wait for the store lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial configurations from several
/// sources can be layered.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, OutputFormat};
///
/// let config: Config = serde_yaml::from_str("output_format: json\n").unwrap();
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// assert_eq!(config.lock_wait_seconds(), 5);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for the store lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Disable automatic creation of the data directory and store.
    pub disable_autoinit: Option<bool>,

    /// Status given to new reservations when none is requested.
    pub default_status: Option<ReservationStatus>,
}

impl Config {
    /// Returns the lock wait, falling back to the default.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Returns the output format, falling back to `table`.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Returns whether automatic initialization is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Returns the status for new reservations, falling back to `Confirmed`.
    #[must_use]
    pub fn default_status(&self) -> ReservationStatus {
        self.default_status.unwrap_or(ReservationStatus::Confirmed)
    }
}

/// Output format for listing reservations.
///
/// # Examples
///
/// ```
/// use tablebook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(format!(
                "unknown output format '{other}' (expected table, json, csv or tsv)"
            )),
        }
    }
}
