//! Flat key/value transfer representation of a reservation.
//!
//! A [`TransferBag`] is what crosses a serialization boundary between two
//! parts of an application (or two processes): a JSON object with
//! well-known keys. [`TransferCodec::encode`] writes every field twice,
//! once as the whole serialized object and once as individual keys, so a
//! receiver can recover the reservation from either form.
//!
//! Decoding tries an ordered list of [`DecodeStrategy`] values and stops at
//! the first that yields a reservation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};
use crate::reservation::{NewReservation, Reservation, ReservationStatus};
use crate::validation::ValidationError;

/// Key holding the whole serialized reservation.
pub const KEY_RESERVATION_DATA: &str = "reservation_data";
/// Key holding the reservation identifier.
pub const KEY_RESERVATION_ID: &str = "reservation_id";
/// Key holding the guest name.
pub const KEY_NAME: &str = "name";
/// Key holding the party size.
pub const KEY_PARTY_SIZE: &str = "party_size";
/// Key holding the date.
pub const KEY_DATE: &str = "date";
/// Key holding the time.
pub const KEY_TIME: &str = "time";
/// Key holding the table label.
pub const KEY_TABLE: &str = "table";
/// Key holding the note.
pub const KEY_NOTE: &str = "note";
/// Key holding the status name.
pub const KEY_STATUS: &str = "status";
/// Key holding the creation time.
pub const KEY_CREATED_AT: &str = "created_at";
/// Key holding the modification time.
pub const KEY_UPDATED_AT: &str = "updated_at";
/// Key holding the requested [`TransferAction`].
pub const KEY_ACTION: &str = "action";
/// Key holding a nested bag consulted when the top level has no data.
pub const KEY_EXTRAS: &str = "extras";
/// Key naming the program that produced the bag.
pub const KEY_SOURCE: &str = "source";
/// Key holding the time the bag was produced.
pub const KEY_TIMESTAMP: &str = "timestamp";
/// Key holding the bag layout version.
pub const KEY_DATA_VERSION: &str = "data_version";

/// Bag layout version written by this crate.
pub const DATA_VERSION: i64 = 1;
/// Source reported for bags that do not name one.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Party size value meaning "not supplied".
pub const PARTY_SIZE_SENTINEL: i64 = -1;

/// What the receiver of a bag is asked to do with it.
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
#[serde(rename_all = "lowercase")]
pub enum TransferAction {
    /// Fill a new form.
    Create,
    /// Edit an existing reservation.
    Edit,
    /// Show details.
    #[default]
    View,
    /// Delete the reservation.
    Delete,
}

impl TransferAction {
    /// The wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TransferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "view" => Ok(Self::View),
            "delete" => Ok(Self::Delete),
            _ => Err(ValidationError::new(
                "action",
                format!("unknown action '{s}'"),
            )),
        }
    }
}

/// A flat JSON object carrying a reservation across a boundary.
///
/// # Examples
///
/// ```
/// use tablebook::transfer::TransferBag;
///
/// let bag: TransferBag = serde_json::from_str(r#"{"name": "Ana", "party_size": 2}"#).unwrap();
/// assert_eq!(bag.get_str("name"), Some("Ana"));
/// assert_eq!(bag.get_i64("party_size"), Some(2));
/// assert!(bag.get_str("party_size").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferBag(Map<String, Value>);

impl TransferBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns `true` if `key` is present, whatever its value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the raw value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the value under `key` if it is an integer.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Returns the nested bag under `key` if it is an object.
    #[must_use]
    pub fn get_bag(&self, key: &str) -> Option<Self> {
        self.0
            .get(key)
            .and_then(Value::as_object)
            .map(|map| Self(map.clone()))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the bag has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the bag, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for TransferBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Provenance carried alongside the reservation keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Program that produced the bag.
    pub source: String,
    /// Milliseconds since the Unix epoch when the bag was produced.
    pub timestamp: i64,
    /// Bag layout version.
    pub data_version: i64,
}

impl TransferParams {
    /// Parameters for a bag produced by `source` at the clock's current time.
    #[must_use]
    pub fn new(source: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            source: source.into(),
            timestamp: clock.now_millis(),
            data_version: DATA_VERSION,
        }
    }

    /// Writes the parameters into `bag`, replacing earlier values.
    pub fn write_to(&self, bag: &mut TransferBag) {
        bag.insert(KEY_SOURCE, self.source.as_str());
        bag.insert(KEY_TIMESTAMP, self.timestamp);
        bag.insert(KEY_DATA_VERSION, self.data_version);
    }
}

/// Signature shared by decode strategies.
pub type DecodeFn = fn(&TransferBag, &dyn Clock) -> Option<Reservation>;

/// One named way of recovering a reservation from a bag.
#[derive(Debug, Clone, Copy)]
pub struct DecodeStrategy {
    /// Name reported in logs when this strategy succeeds.
    pub name: &'static str,
    /// The decoding function.
    pub decode: DecodeFn,
}

/// Encodes reservations into bags and decodes them back.
///
/// # Examples
///
/// ```
/// use tablebook::transfer::TransferCodec;
/// use tablebook::{NewReservation, Reservation};
///
/// let codec = TransferCodec::default();
/// let reservation = Reservation::create(NewReservation {
///     name: "Budi".into(),
///     party_size: 6,
///     date: "17/12/2024".into(),
///     ..NewReservation::default()
/// });
///
/// let bag = codec.encode(&reservation);
/// assert!(codec.is_present(&bag));
/// assert_eq!(codec.decode(&bag), Some(reservation));
/// ```
#[derive(Debug, Clone)]
pub struct TransferCodec {
    strategies: Vec<DecodeStrategy>,
}

impl Default for TransferCodec {
    /// Whole object, then individual keys, then the nested `extras` bag.
    fn default() -> Self {
        Self::with_strategies(vec![
            DecodeStrategy {
                name: "whole object",
                decode: decode_whole_object,
            },
            DecodeStrategy {
                name: "individual keys",
                decode: decode_individual_keys,
            },
            DecodeStrategy {
                name: "nested extras",
                decode: decode_nested_extras,
            },
        ])
    }
}

impl TransferCodec {
    /// Creates a codec that tries `strategies` in order.
    #[must_use]
    pub const fn with_strategies(strategies: Vec<DecodeStrategy>) -> Self {
        Self { strategies }
    }

    /// Returns the decode strategies in the order they are tried.
    #[must_use]
    pub fn strategies(&self) -> &[DecodeStrategy] {
        &self.strategies
    }

    /// Writes every field of `reservation` into a new bag.
    #[must_use]
    pub fn encode(&self, reservation: &Reservation) -> TransferBag {
        let mut bag = TransferBag::new();
        // Serializing a plain struct of strings and integers cannot fail
        if let Ok(whole) = serde_json::to_value(reservation) {
            bag.insert(KEY_RESERVATION_DATA, whole);
        }
        bag.insert(KEY_RESERVATION_ID, reservation.id());
        bag.insert(KEY_NAME, reservation.name());
        bag.insert(KEY_PARTY_SIZE, reservation.party_size());
        bag.insert(KEY_DATE, reservation.date());
        bag.insert(KEY_TIME, reservation.time());
        bag.insert(KEY_TABLE, reservation.table());
        bag.insert(KEY_NOTE, reservation.note());
        bag.insert(KEY_STATUS, reservation.status().as_str());
        bag.insert(KEY_CREATED_AT, reservation.created_at());
        bag.insert(KEY_UPDATED_AT, reservation.updated_at());
        bag
    }

    /// Like [`encode`](Self::encode), also recording the requested action.
    #[must_use]
    pub fn encode_with_action(&self, reservation: &Reservation, action: TransferAction) -> TransferBag {
        let mut bag = self.encode(reservation);
        bag.insert(KEY_ACTION, action.as_str());
        bag
    }

    /// Recovers a reservation from `bag` using the wall clock for defaults.
    #[must_use]
    pub fn decode(&self, bag: &TransferBag) -> Option<Reservation> {
        self.decode_with_clock(bag, &SystemClock)
    }

    /// Recovers a reservation from `bag`.
    ///
    /// Strategies run in order and the first success wins. Returns `None`
    /// when none of them finds usable data.
    #[must_use]
    pub fn decode_with_clock(&self, bag: &TransferBag, clock: &dyn Clock) -> Option<Reservation> {
        let found = self.strategies.iter().find_map(|strategy| {
            (strategy.decode)(bag, clock).map(|reservation| (strategy.name, reservation))
        });

        match found {
            Some((name, reservation)) => {
                log::debug!("Decoded reservation {} via {name}", reservation.id());
                Some(reservation)
            }
            None => {
                log::debug!("No reservation data found in transfer bag");
                None
            }
        }
    }

    /// Like [`decode`](Self::decode), but never comes back empty-handed.
    ///
    /// When no strategy succeeds the result is a placeholder booking for
    /// "Guest", two people on 01/01/2024 at 12:00 at "Table 1".
    #[must_use]
    pub fn decode_or_placeholder(&self, bag: &TransferBag) -> Reservation {
        self.decode_or_placeholder_with_clock(bag, &SystemClock)
    }

    /// [`decode_or_placeholder`](Self::decode_or_placeholder) with an
    /// explicit clock.
    #[must_use]
    pub fn decode_or_placeholder_with_clock(&self, bag: &TransferBag, clock: &dyn Clock) -> Reservation {
        self.decode_with_clock(bag, clock).unwrap_or_else(|| {
            log::debug!("Using placeholder reservation");
            Reservation::create_with_clock(
                NewReservation {
                    name: "Guest".to_string(),
                    party_size: 2,
                    date: "01/01/2024".to_string(),
                    time: "12:00".to_string(),
                    table: "Table 1".to_string(),
                    note: String::new(),
                    status: Some(ReservationStatus::Pending),
                },
                clock,
            )
        })
    }

    /// Reads the provenance parameters, filling in what the bag lacks.
    ///
    /// A missing source reads as `"unknown"`, a missing timestamp as the
    /// current time and a missing version as 1.
    #[must_use]
    pub fn additional_params(&self, bag: &TransferBag) -> TransferParams {
        self.additional_params_with_clock(bag, &SystemClock)
    }

    /// [`additional_params`](Self::additional_params) with an explicit clock.
    #[must_use]
    pub fn additional_params_with_clock(&self, bag: &TransferBag, clock: &dyn Clock) -> TransferParams {
        TransferParams {
            source: bag.get_str(KEY_SOURCE).unwrap_or(UNKNOWN_SOURCE).to_string(),
            timestamp: bag
                .get_i64(KEY_TIMESTAMP)
                .unwrap_or_else(|| clock.now_millis()),
            data_version: bag.get_i64(KEY_DATA_VERSION).unwrap_or(DATA_VERSION),
        }
    }

    /// Returns `true` if `bag` looks like it carries a reservation.
    ///
    /// This only checks for keys; [`decode`](Self::decode) may still fail.
    #[must_use]
    pub fn is_present(&self, bag: &TransferBag) -> bool {
        bag.contains(KEY_RESERVATION_DATA)
            || (bag.contains(KEY_NAME) && bag.contains(KEY_PARTY_SIZE) && bag.contains(KEY_DATE))
    }

    /// Checks that a decoded reservation has every field a receiver needs.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking name, party size, date,
    /// time and table in that order.
    pub fn validate_decoded(&self, reservation: &Reservation) -> Result<(), ValidationError> {
        if reservation.name().trim().is_empty() {
            return Err(ValidationError::new("name", "name must not be blank"));
        }
        if reservation.party_size() < 1 {
            return Err(ValidationError::new("party_size", "invalid party size"));
        }
        if reservation.date().trim().is_empty() {
            return Err(ValidationError::new("date", "invalid date"));
        }
        if reservation.time().trim().is_empty() {
            return Err(ValidationError::new("time", "invalid time"));
        }
        if reservation.table().trim().is_empty() {
            return Err(ValidationError::new("table", "invalid table"));
        }
        Ok(())
    }

    /// Reads the requested action; absent or unknown values mean `View`.
    #[must_use]
    pub fn action(&self, bag: &TransferBag) -> TransferAction {
        bag.get_str(KEY_ACTION)
            .and_then(|action| action.parse().ok())
            .unwrap_or_default()
    }
}

/// Decodes the serialized object under `reservation_data`.
fn decode_whole_object(bag: &TransferBag, _clock: &dyn Clock) -> Option<Reservation> {
    let value = bag.get(KEY_RESERVATION_DATA)?;
    match serde_json::from_value::<Reservation>(value.clone()) {
        Ok(reservation) if reservation.created_at() <= reservation.updated_at() => {
            Some(reservation)
        }
        Ok(reservation) => {
            log::debug!(
                "Ignoring whole object {}: timestamps out of order",
                reservation.id()
            );
            None
        }
        Err(e) => {
            log::debug!("Ignoring malformed whole object: {e}");
            None
        }
    }
}

/// Decodes a reservation from the individual field keys.
fn decode_individual_keys(bag: &TransferBag, clock: &dyn Clock) -> Option<Reservation> {
    let name = bag.get_str(KEY_NAME).filter(|name| !name.is_empty())?;
    let date = bag.get_str(KEY_DATE).filter(|date| !date.is_empty())?;
    let party_size = bag
        .get_i64(KEY_PARTY_SIZE)
        .filter(|&size| size != PARTY_SIZE_SENTINEL)
        .and_then(|size| i32::try_from(size).ok())?;

    let status = match bag.get_str(KEY_STATUS) {
        None => ReservationStatus::Confirmed,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Unknown status '{raw}' in transfer bag, using Confirmed");
            ReservationStatus::Confirmed
        }),
    };

    // A missing timestamp never lands on the wrong side of a supplied one
    let now = clock.now_millis();
    let (created_at, updated_at) = match (bag.get_i64(KEY_CREATED_AT), bag.get_i64(KEY_UPDATED_AT)) {
        (Some(created), Some(updated)) => (created, updated),
        (Some(created), None) => (created, now.max(created)),
        (None, Some(updated)) => (now.min(updated), updated),
        (None, None) => (now, now),
    };

    let mut builder = Reservation::builder(name, party_size, date)
        .time(bag.get_str(KEY_TIME).unwrap_or_default())
        .table(bag.get_str(KEY_TABLE).unwrap_or_default())
        .note(bag.get_str(KEY_NOTE).unwrap_or_default())
        .status(status)
        .created_at(created_at)
        .updated_at(updated_at);
    if let Some(id) = bag.get_str(KEY_RESERVATION_ID) {
        builder = builder.id(id);
    }

    match builder.build_with_clock(clock) {
        Ok(reservation) => Some(reservation),
        Err(e) => {
            log::debug!("Ignoring individual keys: {e}");
            None
        }
    }
}

/// Applies the top-level strategies to the nested `extras` bag.
fn decode_nested_extras(bag: &TransferBag, clock: &dyn Clock) -> Option<Reservation> {
    let extras = bag.get_bag(KEY_EXTRAS)?;
    decode_whole_object(&extras, clock).or_else(|| decode_individual_keys(&extras, clock))
}
