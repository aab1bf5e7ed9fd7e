//! Property-based tests for the validation rules.

use super::{
    booking_horizon, validate_date_on, validate_name, validate_party_size, DATE_FORMAT,
    MAX_NAME_LENGTH, MIN_NAME_LENGTH,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// Letters-and-spaces names of an acceptable length
fn valid_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z ]{3,50}"
}

// Names that are too short or too long but otherwise well-formed
fn bad_length_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Za-z]{1,2}", "[A-Za-z]{51,80}"]
}

fn today_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn valid_names_always_pass(name in valid_name_strategy()) {
        prop_assert!(validate_name(&name).is_ok());
    }

    #[test]
    fn names_outside_length_bounds_fail(name in bad_length_name_strategy()) {
        let len = name.chars().count();
        prop_assert!(len < MIN_NAME_LENGTH || len > MAX_NAME_LENGTH);
        prop_assert!(validate_name(&name).is_err());
    }

    #[test]
    fn names_with_a_digit_fail(prefix in "[A-Za-z]{2,20}", digit in 0u8..10, suffix in "[A-Za-z]{0,20}") {
        let name = format!("{prefix}{digit}{suffix}");
        prop_assert!(validate_name(&name).is_err());
    }

    #[test]
    fn party_size_in_range_passes(size in 1i32..=50) {
        prop_assert!(validate_party_size(size).is_ok());
    }

    #[test]
    fn party_size_out_of_range_fails(size in prop_oneof![i32::MIN..1, 51..i32::MAX]) {
        prop_assert!(validate_party_size(size).is_err());
    }

    #[test]
    fn dates_inside_window_pass(today in today_strategy(), ahead in 0i64..365) {
        let date = today + Duration::days(ahead);
        prop_assume!(date <= booking_horizon(today));
        let formatted = date.format(DATE_FORMAT).to_string();
        prop_assert!(validate_date_on(&formatted, today).is_ok());
    }

    #[test]
    fn past_dates_fail(today in today_strategy(), behind in 1i64..3000) {
        let date = today - Duration::days(behind);
        let formatted = date.format(DATE_FORMAT).to_string();
        prop_assert!(validate_date_on(&formatted, today).is_err());
    }

    #[test]
    fn dates_past_horizon_fail(today in today_strategy(), beyond in 1i64..3000) {
        let date = booking_horizon(today) + Duration::days(beyond);
        let formatted = date.format(DATE_FORMAT).to_string();
        prop_assert!(validate_date_on(&formatted, today).is_err());
    }
}
