//! Property-based tests for `Reservation` and `ReservationStatus`.

use super::{NewReservation, Reservation, ReservationStatus, ReservationUpdate};
use crate::clock::MockClock;
use proptest::prelude::*;

fn clock_at(millis: i64) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_now_millis().return_const(millis);
    clock
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

fn form_strategy() -> impl Strategy<Value = NewReservation> {
    (
        "[A-Za-z ]{3,50}",
        1i32..=50,
        "[0-3][0-9]/[01][0-9]/20[2-9][0-9]",
        "([01][0-9]|2[0-3]):[0-5][0-9]",
        "[A-Za-z0-9 ]{0,12}",
        prop::option::of(status_strategy()),
    )
        .prop_map(|(name, party_size, date, time, table, status)| NewReservation {
            name,
            party_size,
            date,
            time,
            table,
            note: String::new(),
            status,
        })
}

fn update_strategy() -> impl Strategy<Value = ReservationUpdate> {
    (
        prop::option::of("[A-Za-z ]{3,50}"),
        prop::option::of(1i32..=50),
        prop::option::of("[A-Za-z0-9 ]{0,12}"),
        prop::option::of(status_strategy()),
    )
        .prop_map(|(name, party_size, table, status)| ReservationUpdate {
            name,
            party_size,
            table,
            status,
            ..ReservationUpdate::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    /// A created reservation has equal timestamps and a prefixed id.
    #[test]
    fn prop_create_stamps_once(form in form_strategy(), now in 0i64..4_000_000_000_000) {
        let expected_status = form.status.unwrap_or(ReservationStatus::Confirmed);
        let reservation = Reservation::create_with_clock(form, &clock_at(now));

        prop_assert!(reservation.id().starts_with("RES_"));
        prop_assert_eq!(reservation.created_at(), now);
        prop_assert_eq!(reservation.updated_at(), now);
        prop_assert_eq!(reservation.status(), expected_status);
    }

    /// Updates keep identity and creation time, and never move
    /// `updated_at` backwards, whatever the clock says.
    #[test]
    fn prop_update_preserves_identity(
        form in form_strategy(),
        changes in update_strategy(),
        created in 0i64..4_000_000_000_000,
        later in -1_000_000i64..1_000_000,
    ) {
        let original = Reservation::create_with_clock(form, &clock_at(created));
        let edited = original.update_with_clock(changes.clone(), &clock_at(created + later));

        prop_assert_eq!(edited.id(), original.id());
        prop_assert_eq!(edited.created_at(), original.created_at());
        prop_assert!(edited.updated_at() >= original.updated_at());
        prop_assert_eq!(
            edited.party_size(),
            changes.party_size.unwrap_or(original.party_size())
        );
        prop_assert_eq!(edited.date(), original.date());
        prop_assert_eq!(edited.time(), original.time());
    }

    /// Status names parse back regardless of ASCII case.
    #[test]
    fn prop_status_parses_any_case(status in status_strategy(), upper in any::<bool>()) {
        let name = if upper {
            status.as_str().to_uppercase()
        } else {
            status.as_str().to_lowercase()
        };
        prop_assert_eq!(name.parse::<ReservationStatus>().unwrap(), status);
    }

    /// The flat map always carries the ten persisted fields.
    #[test]
    fn prop_flat_map_is_complete(form in form_strategy()) {
        let reservation = Reservation::create_with_clock(form, &clock_at(1_000));
        let flat = reservation.to_flat_map();

        prop_assert_eq!(flat.len(), 10);
        prop_assert_eq!(flat["partySize"].as_i64(), Some(i64::from(reservation.party_size())));
        prop_assert_eq!(flat["status"].as_str(), Some(reservation.status().as_str()));
    }
}
