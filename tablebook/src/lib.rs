#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! A library for validating, storing and transferring restaurant table
//! reservations.
//!
//! ## Core Types
//!
//! - [`Reservation`] and [`ReservationStatus`]: the reservation entity
//! - [`validation`]: field rules for names, party sizes, dates and times
//! - [`ReservationStore`]: local persistence in a `SQLite` settings area
//! - [`TransferCodec`]: flat key/value encoding with fallback decoding
//! - [`ReservationQuery`]: search, status filter and sort for list views
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use tablebook::validation::validate_all_on;
//! use tablebook::{NewReservation, Reservation, ReservationStore};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
//! validate_all_on("Budi", 6, "17/12/2024", today).unwrap();
//!
//! let mut store = ReservationStore::in_memory().unwrap();
//! store
//!     .add(&Reservation::create(NewReservation {
//!         name: "Budi".into(),
//!         party_size: 6,
//!         date: "17/12/2024".into(),
//!         ..NewReservation::default()
//!     }))
//!     .unwrap();
//!
//! assert_eq!(store.load().len(), 1);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod reservation;
pub mod store;
pub mod transfer;
pub mod validation;

// Re-export key types at crate root for convenience
pub use clock::{Clock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use query::{ReservationQuery, ReservationSummary, SortField, SortOrder};
pub use reservation::{
    NewReservation, Reservation, ReservationBuilder, ReservationStatus, ReservationUpdate,
};
pub use store::{ReservationStore, SettingsArea, StoreConfig};
pub use transfer::{TransferAction, TransferBag, TransferCodec, TransferParams};
pub use validation::ValidationError;
