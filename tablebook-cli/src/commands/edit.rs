//! Edit command implementation.
//!
//! This module implements the `edit` command. Only the fields given on the
//! command line change, and each of them is checked with the same rules as
//! the `add` form. Unless a status is given, an edited reservation moves to
//! `Updated`.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use tablebook::validation::{validate_date, validate_name, validate_party_size, validate_time};
use tablebook::{Error as LibError, ReservationStatus, ReservationUpdate};

/// Edit an existing reservation.
#[derive(Args)]
pub struct EditCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,

    /// New guest name
    #[arg(long)]
    pub name: Option<String>,

    /// New number of guests
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub party_size: Option<i32>,

    /// New date
    #[arg(long, value_name = "DD/MM/YYYY")]
    pub date: Option<String>,

    /// New time (empty to clear)
    #[arg(long, value_name = "HH:MM")]
    pub time: Option<String>,

    /// New table label
    #[arg(long)]
    pub table: Option<String>,

    /// New note
    #[arg(long)]
    pub note: Option<String>,

    /// New status (defaults to Updated)
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<ReservationStatus>,
}

impl EditCommand {
    /// Execute the edit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = self.id;
        let mut changes = ReservationUpdate {
            name: self.name,
            party_size: self.party_size,
            date: self.date,
            time: self.time,
            table: self.table,
            note: self.note,
            status: self.status,
        };

        // 1. Validate what changes
        if changes.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to change; pass at least one field".to_string(),
            ));
        }
        validate_changes(&changes)?;
        changes.status.get_or_insert(ReservationStatus::Updated);

        // 2. Load configuration and open the store
        let config = load_configuration(global)?;
        let mut store = open_store(global, &config)?;

        // 3. Apply and write back in one transaction
        let edited = store
            .modify(&id, |current| current.update(changes))?
            .ok_or_else(|| LibError::NotFound {
                resource: format!("reservation {id}"),
            })?;

        global.logger.info(&format!("Updated {edited}"));

        Ok(())
    }
}

fn validate_changes(changes: &ReservationUpdate) -> Result<(), CliError> {
    if let Some(ref name) = changes.name {
        validate_name(name)?;
    }
    if let Some(party_size) = changes.party_size {
        validate_party_size(party_size)?;
    }
    if let Some(ref date) = changes.date {
        validate_date(date)?;
    }
    if let Some(ref time) = changes.time {
        if !time.is_empty() {
            validate_time(time)?;
        }
    }
    Ok(())
}
