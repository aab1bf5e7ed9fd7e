//! Time source and reservation identifier generation.
//!
//! The entity and codec read the current time through the [`Clock`] trait
//! so tests can pin it. Identifiers keep the `RES_<epoch millis>` shape but
//! come from a process-wide monotonic counter, which keeps two reservations
//! created within the same millisecond apart.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Local, NaiveDate, Utc};

/// Prefix shared by every reservation identifier.
pub const ID_PREFIX: &str = "RES_";

/// A source of the current time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

static LAST_ISSUED: AtomicI64 = AtomicI64::new(i64::MIN);

/// Issues a fresh reservation identifier.
///
/// The numeric part is the clock reading, bumped past the last value this
/// process handed out when the clock has not advanced.
///
/// # Examples
///
/// ```
/// use tablebook::clock::{next_id, SystemClock};
///
/// let first = next_id(&SystemClock);
/// let second = next_id(&SystemClock);
/// assert!(first.starts_with("RES_"));
/// assert_ne!(first, second);
/// ```
pub fn next_id(clock: &dyn Clock) -> String {
    let now = clock.now_millis();
    let previous = LAST_ISSUED
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(if now > last { now } else { last + 1 })
        })
        .unwrap_or(now);
    let issued = if now > previous { now } else { previous + 1 };
    format!("{ID_PREFIX}{issued}")
}
