//! Local persistence.
//!
//! A [`SettingsArea`] is a small `SQLite` key/value database; the
//! [`ReservationStore`] keeps the whole reservation list as one JSON string
//! inside it, under the `reservations` key.
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::store::{ReservationStore, StoreConfig};
//! use tablebook::{NewReservation, Reservation};
//!
//! let mut store = ReservationStore::open(StoreConfig::in_data_dir("/tmp/tablebook")).unwrap();
//!
//! let reservation = Reservation::create(NewReservation {
//!     name: "John Doe".into(),
//!     party_size: 4,
//!     date: "15/12/2025".into(),
//!     ..NewReservation::default()
//! });
//! store.add(&reservation).unwrap();
//!
//! for reservation in store.load() {
//!     println!("{reservation}");
//! }
//! ```

mod config;
pub mod migrations;
mod reservations;
mod schema;
mod settings;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_store_path, StoreConfig, DATA_DIR_ENV,
    STORE_FILE_NAME,
};
pub use reservations::ReservationStore;
pub use schema::{CURRENT_SCHEMA_VERSION, RESERVATIONS_KEY};
pub use settings::SettingsArea;
