//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `TABLEBOOK_*` environment variables
//! that override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::reservation::ReservationStatus;
use std::env;

/// Overrides `maximum_lock_wait_seconds`.
pub const LOCK_WAIT_ENV: &str = "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "TABLEBOOK_OUTPUT_FORMAT";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "TABLEBOOK_DISABLE_AUTOINIT";
/// Overrides `default_status`.
pub const DEFAULT_STATUS_ENV: &str = "TABLEBOOK_DEFAULT_STATUS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong shape
    /// (non-numeric timeout, invalid boolean, unknown format or status).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format =
                Some(
                    format
                        .parse::<OutputFormat>()
                        .map_err(|message| Error::Validation {
                            field: OUTPUT_FORMAT_ENV.into(),
                            message,
                        })?,
                );
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(status) = env::var(DEFAULT_STATUS_ENV) {
            config.default_status =
                Some(
                    status
                        .parse::<ReservationStatus>()
                        .map_err(|e| Error::Validation {
                            field: DEFAULT_STATUS_ENV.into(),
                            message: e.message,
                        })?,
                );
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: [&str; 4] = [
        LOCK_WAIT_ENV,
        OUTPUT_FORMAT_ENV,
        DISABLE_AUTOINIT_ENV,
        DEFAULT_STATUS_ENV,
    ];

    fn clear_vars() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_true_variants() {
        for input in ["true", "TRUE", "1", "yes", "YES", "on", "ON"] {
            assert!(EnvironmentConfig::parse_bool("test", input).unwrap());
        }
    }

    #[test]
    fn test_parse_bool_false_variants() {
        for input in ["false", "FALSE", "0", "no", "NO", "off", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("test", input).unwrap());
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_vars();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_all_vars() {
        clear_vars();
        env::set_var(LOCK_WAIT_ENV, "42");
        env::set_var(OUTPUT_FORMAT_ENV, "tsv");
        env::set_var(DISABLE_AUTOINIT_ENV, "yes");
        env::set_var(DEFAULT_STATUS_ENV, "pending");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();

        result.unwrap();
        assert_eq!(config.maximum_lock_wait_seconds, Some(42));
        assert_eq!(config.output_format, Some(OutputFormat::Tsv));
        assert_eq!(config.disable_autoinit, Some(true));
        assert_eq!(config.default_status, Some(ReservationStatus::Pending));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_rejects_bad_timeout() {
        clear_vars();
        env::set_var(LOCK_WAIT_ENV, "soon");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();

        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, LOCK_WAIT_ENV),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_apply_overrides_rejects_bad_status() {
        clear_vars();
        env::set_var(DEFAULT_STATUS_ENV, "Maybe");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();

        assert!(result.is_err());
    }
}
