//! The reservation entity.
//!
//! A [`Reservation`] is an immutable value. New reservations come from the
//! form path ([`Reservation::create`]) or from bare construction through
//! [`Reservation::builder`]; edits produce a fresh value through
//! [`Reservation::update`] that keeps the identifier and creation time.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::{next_id, Clock, SystemClock};
use crate::validation::{parse_date, parse_time, ValidationError, TIME_FORMAT};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// Display format used by [`Reservation::formatted_date`].
pub const DISPLAY_DATE_FORMAT: &str = "%A, %d %B %Y";

/// Lifecycle state of a reservation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum ReservationStatus {
    /// Recorded but not yet confirmed.
    #[default]
    Pending,
    /// Confirmed by the restaurant.
    Confirmed,
    /// Cancelled by the guest or the restaurant.
    Cancelled,
    /// Edited after creation.
    Updated,
}

impl ReservationStatus {
    /// All statuses, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Updated,
    ];

    /// The canonical name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Updated => "Updated",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    /// Parses a status name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::new("status", format!("unknown status '{s}'")))
    }
}

/// A restaurant table reservation.
///
/// # Examples
///
/// ```
/// use tablebook::{NewReservation, Reservation, ReservationStatus};
///
/// let reservation = Reservation::create(NewReservation {
///     name: "Budi".into(),
///     party_size: 6,
///     date: "17/12/2024".into(),
///     time: "19:00".into(),
///     table: "Table 4".into(),
///     ..NewReservation::default()
/// });
///
/// assert!(reservation.id().starts_with("RES_"));
/// assert_eq!(reservation.status(), ReservationStatus::Confirmed);
/// assert_eq!(reservation.created_at(), reservation.updated_at());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    id: String,
    name: String,
    party_size: i32,
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    table: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    status: ReservationStatus,
    created_at: i64,
    updated_at: i64,
}

/// Raw form input for a new reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewReservation {
    /// Guest name.
    pub name: String,
    /// Number of guests.
    pub party_size: i32,
    /// Date in `dd/MM/yyyy` form.
    pub date: String,
    /// Time in `HH:mm` form.
    pub time: String,
    /// Table label.
    pub table: String,
    /// Free-text note.
    pub note: String,
    /// Initial status; `Confirmed` when absent.
    pub status: Option<ReservationStatus>,
}

/// A set of field changes applied by [`Reservation::update`].
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationUpdate {
    /// New guest name.
    pub name: Option<String>,
    /// New party size.
    pub party_size: Option<i32>,
    /// New date.
    pub date: Option<String>,
    /// New time.
    pub time: Option<String>,
    /// New table label.
    pub table: Option<String>,
    /// New note.
    pub note: Option<String>,
    /// New status.
    pub status: Option<ReservationStatus>,
}

impl ReservationUpdate {
    /// Returns `true` if no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Reservation {
    /// Creates a reservation from form input using the wall clock.
    #[must_use]
    pub fn create(form: NewReservation) -> Self {
        Self::create_with_clock(form, &SystemClock)
    }

    /// Creates a reservation from form input.
    ///
    /// Assigns a fresh identifier and sets both timestamps to the same
    /// clock reading.
    #[must_use]
    pub fn create_with_clock(form: NewReservation, clock: &dyn Clock) -> Self {
        let now = clock.now_millis();
        Self {
            id: next_id(clock),
            name: form.name,
            party_size: form.party_size,
            date: form.date,
            time: form.time,
            table: form.table,
            note: form.note,
            status: form.status.unwrap_or(ReservationStatus::Confirmed),
            created_at: now,
            updated_at: now,
        }
    }

    /// Starts bare construction of a reservation.
    ///
    /// Unlike [`Reservation::create`], the status defaults to `Pending`.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        party_size: i32,
        date: impl Into<String>,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            name: name.into(),
            party_size,
            date: date.into(),
            time: String::new(),
            table: String::new(),
            note: String::new(),
            status: ReservationStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns a copy with `changes` applied, using the wall clock.
    #[must_use]
    pub fn update(&self, changes: ReservationUpdate) -> Self {
        self.update_with_clock(changes, &SystemClock)
    }

    /// Returns a copy with `changes` applied.
    ///
    /// The identifier and creation time carry over; `updated_at` moves to
    /// the clock reading but never backwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{NewReservation, Reservation, ReservationStatus, ReservationUpdate};
    ///
    /// let original = Reservation::create(NewReservation {
    ///     name: "John Doe".into(),
    ///     party_size: 4,
    ///     date: "15/12/2025".into(),
    ///     ..NewReservation::default()
    /// });
    /// let edited = original.update(ReservationUpdate {
    ///     party_size: Some(6),
    ///     status: Some(ReservationStatus::Updated),
    ///     ..ReservationUpdate::default()
    /// });
    ///
    /// assert_eq!(edited.id(), original.id());
    /// assert_eq!(edited.party_size(), 6);
    /// assert_eq!(edited.date(), original.date());
    /// ```
    #[must_use]
    pub fn update_with_clock(&self, changes: ReservationUpdate, clock: &dyn Clock) -> Self {
        let ReservationUpdate {
            name,
            party_size,
            date,
            time,
            table,
            note,
            status,
        } = changes;

        Self {
            id: self.id.clone(),
            name: name.unwrap_or_else(|| self.name.clone()),
            party_size: party_size.unwrap_or(self.party_size),
            date: date.unwrap_or_else(|| self.date.clone()),
            time: time.unwrap_or_else(|| self.time.clone()),
            table: table.unwrap_or_else(|| self.table.clone()),
            note: note.unwrap_or_else(|| self.note.clone()),
            status: status.unwrap_or(self.status),
            created_at: self.created_at,
            updated_at: clock.now_millis().max(self.updated_at),
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the guest name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn party_size(&self) -> i32 {
        self.party_size
    }

    /// Returns the raw `dd/MM/yyyy` date.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the raw `HH:mm` time.
    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the table label.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the note.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the creation time in epoch milliseconds.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Returns the last modification time in epoch milliseconds.
    #[must_use]
    pub const fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Formats the date for display, e.g. `Sunday, 15 December 2024`.
    ///
    /// Returns the stored string unchanged if it does not parse.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        parse_date(&self.date).map_or_else(
            || self.date.clone(),
            |date| date.format(DISPLAY_DATE_FORMAT).to_string(),
        )
    }

    /// Formats the time for display.
    ///
    /// Returns the stored string unchanged if it does not parse.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        parse_time(&self.time).map_or_else(
            || self.time.clone(),
            |time| time.format(TIME_FORMAT).to_string(),
        )
    }

    /// Exposes every attribute as a key/value pair, keyed by persisted
    /// field name.
    #[must_use]
    pub fn to_flat_map(&self) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::from(self.id.as_str())),
            ("name", Value::from(self.name.as_str())),
            ("partySize", Value::from(self.party_size)),
            ("date", Value::from(self.date.as_str())),
            ("time", Value::from(self.time.as_str())),
            ("table", Value::from(self.table.as_str())),
            ("note", Value::from(self.note.as_str())),
            ("status", Value::from(self.status.as_str())),
            ("createdAt", Value::from(self.created_at)),
            ("updatedAt", Value::from(self.updated_at)),
        ])
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} guests, {} {}, {})",
            self.id, self.name, self.party_size, self.date, self.time, self.status
        )
    }
}

/// Builder for bare construction of `Reservation` values.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<String>,
    name: String,
    party_size: i32,
    date: String,
    time: String,
    table: String,
    note: String,
    status: ReservationStatus,
    created_at: Option<i64>,
    updated_at: Option<i64>,
}

impl ReservationBuilder {
    /// Sets an explicit identifier instead of generating one.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the time.
    #[must_use]
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Sets the table label.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the modification timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: i64) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation using the wall clock for missing values.
    ///
    /// # Errors
    ///
    /// See [`ReservationBuilder::build_with_clock`].
    pub fn build(self) -> Result<Reservation, ValidationError> {
        self.build_with_clock(&SystemClock)
    }

    /// Builds the reservation.
    ///
    /// A missing identifier is generated; a missing creation time takes the
    /// clock reading and a missing modification time takes the creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is blank or `created_at` is later
    /// than `updated_at`.
    pub fn build_with_clock(self, clock: &dyn Clock) -> Result<Reservation, ValidationError> {
        let id = match self.id {
            Some(id) if id.trim().is_empty() => {
                return Err(ValidationError::new("id", "id must be non-empty"));
            }
            Some(id) => id,
            None => next_id(clock),
        };

        let created_at = self.created_at.unwrap_or_else(|| clock.now_millis());
        let updated_at = self.updated_at.unwrap_or(created_at);
        if created_at > updated_at {
            return Err(ValidationError::new(
                "updated_at",
                "updated_at must not precede created_at",
            ));
        }

        Ok(Reservation {
            id,
            name: self.name,
            party_size: self.party_size,
            date: self.date,
            time: self.time,
            table: self.table,
            note: self.note,
            status: self.status,
            created_at,
            updated_at,
        })
    }
}
