//! Configuration merging.

use crate::config::schema::Config;

/// Layers configurations on top of each other.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigMerger, OutputFormat};
///
/// let mut base = Config {
///     maximum_lock_wait_seconds: Some(5),
///     ..Config::default()
/// };
/// let overlay = Config {
///     output_format: Some(OutputFormat::Json),
///     ..Config::default()
/// };
///
/// ConfigMerger::merge_into(&mut base, &overlay);
/// assert_eq!(base.maximum_lock_wait_seconds, Some(5));
/// assert_eq!(base.output_format, Some(OutputFormat::Json));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges `layers` from lowest to highest precedence.
    #[must_use]
    pub fn merge(layers: &[Config]) -> Config {
        let mut result = Config::default();
        for layer in layers {
            Self::merge_into(&mut result, layer);
        }
        result
    }

    /// Merges `source` into `target`; every field set in `source` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.default_status.is_some() {
            target.default_status = source.default_status;
        }
    }
}
