//! Form-field validation rules for reservations.
//!
//! Every check here is a pure function: no I/O, no clock access except
//! where the caller asks for "today" to be read from the local system.
//! A check returns `Ok(())` or a [`ValidationError`] naming the field and
//! carrying a message that can be shown to the user as-is.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use tablebook::validation::{validate_all_on, validate_name};
//!
//! assert!(validate_name("Ana Maria").is_ok());
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let err = validate_all_on("Jo", 4, "01/04/2025", today).unwrap_err();
//! assert_eq!(err.message, "name too short");
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Local, Months, NaiveDate, NaiveTime};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// Minimum number of characters in a guest name.
pub const MIN_NAME_LENGTH: usize = 3;

/// Maximum number of characters in a guest name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Smallest accepted party size.
pub const MIN_PARTY_SIZE: i32 = 1;

/// Largest accepted party size.
pub const MAX_PARTY_SIZE: i32 = 50;

/// How far ahead a reservation may be booked.
pub const BOOKING_HORIZON_MONTHS: u32 = 12;

/// Storage format for reservation dates (`dd/MM/yyyy`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Storage format for reservation times (`HH:mm`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result of a single validation check.
pub type ValidationResult = Result<(), ValidationError>;

/// Validates the guest name.
///
/// Checks run in order: empty, too short, too long, then character set
/// (ASCII letters and spaces only). Length is counted in characters.
///
/// # Errors
///
/// Returns the first rule the name breaks.
///
/// # Examples
///
/// ```
/// use tablebook::validation::validate_name;
///
/// assert!(validate_name("John Doe").is_ok());
/// assert_eq!(validate_name("").unwrap_err().message, "name required");
/// assert_eq!(validate_name("John123").unwrap_err().message, "invalid name format");
/// ```
pub fn validate_name(name: &str) -> ValidationResult {
    let length = name.chars().count();

    if name.is_empty() {
        return Err(ValidationError::new("name", "name required"));
    }
    if length < MIN_NAME_LENGTH {
        return Err(ValidationError::new("name", "name too short"));
    }
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::new("name", "name too long"));
    }
    if !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::new("name", "invalid name format"));
    }

    Ok(())
}

/// Validates the number of guests.
///
/// # Errors
///
/// Returns an error if `party_size` is outside `1..=50`.
///
/// # Examples
///
/// ```
/// use tablebook::validation::validate_party_size;
///
/// assert!(validate_party_size(4).is_ok());
/// assert!(validate_party_size(0).is_err());
/// assert!(validate_party_size(51).is_err());
/// ```
pub fn validate_party_size(party_size: i32) -> ValidationResult {
    if party_size < MIN_PARTY_SIZE {
        return Err(ValidationError::new(
            "party_size",
            format!("party size must be at least {MIN_PARTY_SIZE}"),
        ));
    }
    if party_size > MAX_PARTY_SIZE {
        return Err(ValidationError::new(
            "party_size",
            format!("party size must be at most {MAX_PARTY_SIZE}"),
        ));
    }
    Ok(())
}

/// Validates a reservation date against the local calendar.
///
/// # Errors
///
/// See [`validate_date_on`].
pub fn validate_date(date: &str) -> ValidationResult {
    validate_date_on(date, Local::now().date_naive())
}

/// Validates a reservation date relative to an explicit `today`.
///
/// The date must parse as `dd/MM/yyyy` and fall within
/// `[today, today + 1 year]`, both ends inclusive.
///
/// # Errors
///
/// Returns "invalid date" when parsing fails, "date in the past" when the
/// date precedes `today`, and "date too far in future" when it lies beyond
/// the booking horizon.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::validation::validate_date_on;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// assert!(validate_date_on("15/06/2025", today).is_ok());
/// assert!(validate_date_on("15/06/2026", today).is_ok());
/// assert!(validate_date_on("14/06/2025", today).is_err());
/// assert!(validate_date_on("32/06/2025", today).is_err());
/// ```
pub fn validate_date_on(date: &str, today: NaiveDate) -> ValidationResult {
    let Some(parsed) = parse_date(date) else {
        return Err(ValidationError::new("date", "invalid date"));
    };

    if parsed < today {
        return Err(ValidationError::new("date", "date in the past"));
    }
    if parsed > booking_horizon(today) {
        return Err(ValidationError::new("date", "date too far in future"));
    }

    Ok(())
}

/// Validates a reservation time in `HH:mm` form.
///
/// This check is not part of [`validate_all`]; degraded records may carry
/// an empty time.
///
/// # Errors
///
/// Returns "invalid time" unless the value is a 24-hour `HH:mm` time.
pub fn validate_time(time: &str) -> ValidationResult {
    if parse_time(time).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("time", "invalid time"))
    }
}

/// Runs the name, party-size and date checks against the local calendar.
///
/// # Errors
///
/// See [`validate_all_on`].
pub fn validate_all(name: &str, party_size: i32, date: &str) -> ValidationResult {
    validate_all_on(name, party_size, date, Local::now().date_naive())
}

/// Runs the name, party-size and date checks, in that order.
///
/// Only the first failure is reported, so a bad name always wins over a
/// bad date.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_all_on(
    name: &str,
    party_size: i32,
    date: &str,
    today: NaiveDate,
) -> ValidationResult {
    validate_name(name)?;
    validate_party_size(party_size)?;
    validate_date_on(date, today)
}

/// The last bookable day for a given `today`.
///
/// A February 29th start clamps to February 28th of the following year.
#[must_use]
pub fn booking_horizon(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(BOOKING_HORIZON_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}

/// Parses a `dd/MM/yyyy` date strictly.
///
/// Day and month accept one or two digits, the year exactly four. Calendar
/// validity is enforced, so `30/02/2025` and `32/01/2025` are rejected.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('/');
    let day = parse_digits(parts.next()?, 1..=2)?;
    let month = parse_digits(parts.next()?, 1..=2)?;
    let year = parse_digits(parts.next()?, 4..=4)?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Parses a two-digit `HH:mm` time strictly.
#[must_use]
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let (hour, minute) = input.split_once(':')?;
    let hour = parse_digits(hour, 2..=2)?;
    let minute = parse_digits(minute, 2..=2)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_digits(part: &str, width: RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
