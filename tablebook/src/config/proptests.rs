//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use crate::reservation::ReservationStatus;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
    ]
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=600),
        prop::option::of(output_format_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(status_strategy()),
    )
        .prop_map(|(timeout, format, autoinit, status)| Config {
            maximum_lock_wait_seconds: timeout,
            output_format: format,
            disable_autoinit: autoinit,
            default_status: status,
        })
}

proptest! {
    #[test]
    fn prop_merge_with_default_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        prop_assert_eq!(ConfigMerger::merge(&[Config::default(), config.clone()]), config);
    }

    #[test]
    fn prop_merge_is_idempotent(a in config_strategy(), b in config_strategy()) {
        let once = ConfigMerger::merge(&[a.clone(), b.clone()]);
        let twice = ConfigMerger::merge(&[a, b.clone(), b]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_set_fields_of_last_layer_win(a in config_strategy(), b in config_strategy()) {
        let merged = ConfigMerger::merge(&[a.clone(), b.clone()]);
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            b.maximum_lock_wait_seconds.or(a.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.output_format, b.output_format.or(a.output_format));
        prop_assert_eq!(merged.disable_autoinit, b.disable_autoinit.or(a.disable_autoinit));
        prop_assert_eq!(merged.default_status, b.default_status.or(a.default_status));
    }

    #[test]
    fn prop_yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
