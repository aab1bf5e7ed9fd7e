//! Persistence of the reservation list.

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::reservation::Reservation;

use super::config::StoreConfig;
use super::schema::RESERVATIONS_KEY;
use super::settings::{delete_value, read_value, write_value, SettingsArea};

/// The reservation list, stored as one JSON blob in a settings area.
///
/// Every mutation is a load-modify-save cycle inside a single `IMMEDIATE`
/// transaction. Mutations read strictly: a corrupt blob is reported as
/// [`Error::CorruptState`] and left untouched until [`clear`] is called.
///
/// [`clear`]: ReservationStore::clear
///
/// # Examples
///
/// ```
/// use tablebook::{NewReservation, Reservation, ReservationStore};
///
/// let mut store = ReservationStore::in_memory().unwrap();
/// let reservation = Reservation::create(NewReservation {
///     name: "Budi".into(),
///     party_size: 6,
///     date: "17/12/2024".into(),
///     ..NewReservation::default()
/// });
///
/// store.add(&reservation).unwrap();
/// assert_eq!(store.load(), vec![reservation]);
/// ```
#[derive(Debug)]
pub struct ReservationStore {
    settings: SettingsArea,
}

impl ReservationStore {
    /// Opens the store in the settings area described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings area cannot be opened.
    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self::from_settings(SettingsArea::open(config)?))
    }

    /// Opens a store backed by a private in-memory settings area.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_settings(SettingsArea::open_in_memory()?))
    }

    /// Binds a store to an already open settings area.
    #[must_use]
    pub const fn from_settings(settings: SettingsArea) -> Self {
        Self { settings }
    }

    /// Returns the underlying settings area.
    #[must_use]
    pub const fn settings(&self) -> &SettingsArea {
        &self.settings
    }

    /// Returns the underlying settings area mutably.
    pub fn settings_mut(&mut self) -> &mut SettingsArea {
        &mut self.settings
    }

    /// Loads every stored reservation in insertion order.
    ///
    /// Missing data yields an empty list. So does unreadable data, after a
    /// warning is logged; use [`try_load`](Self::try_load) to see the error.
    #[must_use]
    pub fn load(&self) -> Vec<Reservation> {
        match self.try_load() {
            Ok(reservations) => reservations,
            Err(e) => {
                log::warn!("Could not load reservations, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Loads every stored reservation, reporting unreadable data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the stored blob is not a valid
    /// reservation list, or a database error if it cannot be read.
    pub fn try_load(&self) -> Result<Vec<Reservation>> {
        read_list(self.settings.connection())
    }

    /// Returns the first reservation with the given identifier.
    ///
    /// # Errors
    ///
    /// See [`try_load`](Self::try_load).
    pub fn get(&self, id: &str) -> Result<Option<Reservation>> {
        Ok(self.try_load()?.into_iter().find(|r| r.id() == id))
    }

    /// Replaces the stored list with `reservations`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&mut self, reservations: &[Reservation]) -> Result<()> {
        let blob = serde_json::to_string(reservations)?;
        self.settings
            .with_immediate(|conn| write_value(conn, RESERVATIONS_KEY, &blob))?;
        log::debug!("Saved {} reservations", reservations.len());
        Ok(())
    }

    /// Appends a reservation.
    ///
    /// Identifiers are not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the stored list is unreadable, or
    /// a database error.
    pub fn add(&mut self, reservation: &Reservation) -> Result<()> {
        self.settings.with_immediate(|conn| {
            let mut list = read_list(conn)?;
            list.push(reservation.clone());
            write_list(conn, &list)
        })?;
        log::debug!("Added reservation {}", reservation.id());
        Ok(())
    }

    /// Replaces the first entry whose identifier matches, keeping its
    /// position.
    ///
    /// Returns `false`, and writes nothing, if no entry matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the stored list is unreadable, or
    /// a database error.
    pub fn update(&mut self, reservation: &Reservation) -> Result<bool> {
        let replaced = self.settings.with_immediate(|conn| {
            let mut list = read_list(conn)?;
            let Some(slot) = list.iter_mut().find(|r| r.id() == reservation.id()) else {
                return Ok(false);
            };
            *slot = reservation.clone();
            write_list(conn, &list)?;
            Ok(true)
        })?;

        if replaced {
            log::debug!("Updated reservation {}", reservation.id());
        } else {
            log::debug!("No reservation {} to update", reservation.id());
        }
        Ok(replaced)
    }

    /// Looks up the first entry with the given identifier and replaces it
    /// with `edit(&current)`, all inside one transaction.
    ///
    /// Returns the stored result, or `None` (writing nothing) if no entry
    /// matches. Concurrent writers see either the state before or after
    /// the whole edit, so changes made by another handle between the
    /// lookup and the write cannot be overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the stored list is unreadable, or
    /// a database error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{NewReservation, Reservation, ReservationStore, ReservationUpdate};
    ///
    /// let mut store = ReservationStore::in_memory().unwrap();
    /// let original = Reservation::create(NewReservation {
    ///     name: "Ana".into(),
    ///     party_size: 2,
    ///     date: "01/01/2025".into(),
    ///     ..NewReservation::default()
    /// });
    /// store.add(&original).unwrap();
    ///
    /// let edited = store
    ///     .modify(original.id(), |current| {
    ///         current.update(ReservationUpdate {
    ///             party_size: Some(4),
    ///             ..ReservationUpdate::default()
    ///         })
    ///     })
    ///     .unwrap();
    /// assert_eq!(edited.map(|r| r.party_size()), Some(4));
    /// ```
    pub fn modify(
        &mut self,
        id: &str,
        edit: impl FnOnce(&Reservation) -> Reservation,
    ) -> Result<Option<Reservation>> {
        let modified = self.settings.with_immediate(|conn| {
            let mut list = read_list(conn)?;
            let Some(slot) = list.iter_mut().find(|r| r.id() == id) else {
                return Ok(None);
            };
            let edited = edit(slot);
            *slot = edited.clone();
            write_list(conn, &list)?;
            Ok(Some(edited))
        })?;

        match modified {
            Some(_) => log::debug!("Modified reservation {id}"),
            None => log::debug!("No reservation {id} to modify"),
        }
        Ok(modified)
    }

    /// Removes every entry with the given identifier.
    ///
    /// Returns how many entries were removed; nothing is written when the
    /// count is zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the stored list is unreadable, or
    /// a database error.
    pub fn remove(&mut self, id: &str) -> Result<usize> {
        let removed = self.settings.with_immediate(|conn| {
            let mut list = read_list(conn)?;
            let before = list.len();
            list.retain(|r| r.id() != id);
            let removed = before - list.len();
            if removed > 0 {
                write_list(conn, &list)?;
            }
            Ok(removed)
        })?;
        log::debug!("Removed {removed} reservation(s) with id {id}");
        Ok(removed)
    }

    /// Deletes the stored list entirely, including unreadable data.
    ///
    /// # Errors
    ///
    /// Returns a database error if the delete fails.
    pub fn clear(&mut self) -> Result<()> {
        self.settings
            .with_immediate(|conn| delete_value(conn, RESERVATIONS_KEY))?;
        log::debug!("Cleared stored reservations");
        Ok(())
    }
}

fn read_list(conn: &Connection) -> Result<Vec<Reservation>> {
    let Some(blob) = read_value(conn, RESERVATIONS_KEY)? else {
        return Ok(Vec::new());
    };

    // A literal `null` is treated like a missing key
    serde_json::from_str::<Option<Vec<Reservation>>>(&blob)
        .map(Option::unwrap_or_default)
        .map_err(|e| Error::CorruptState {
            key: RESERVATIONS_KEY.to_string(),
            details: e.to_string(),
        })
}

fn write_list(conn: &Connection, list: &[Reservation]) -> Result<()> {
    let blob = serde_json::to_string(list)?;
    write_value(conn, RESERVATIONS_KEY, &blob)
}
