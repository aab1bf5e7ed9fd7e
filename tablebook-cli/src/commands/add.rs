//! Add command implementation.
//!
//! This module implements the `add` command, which runs the form checks,
//! creates a reservation and appends it to the store.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use tablebook::validation::{validate_all, validate_time};
use tablebook::{NewReservation, Reservation, ReservationStatus};

/// Validate and store a new reservation.
#[derive(Args)]
pub struct AddCommand {
    /// Guest name (letters and spaces, 3 to 50 characters)
    #[arg(long)]
    pub name: String,

    /// Number of guests (1 to 50)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub party_size: i32,

    /// Reservation date
    #[arg(long, value_name = "DD/MM/YYYY")]
    pub date: String,

    /// Reservation time
    #[arg(long, value_name = "HH:MM")]
    pub time: Option<String>,

    /// Table label
    #[arg(long)]
    pub table: Option<String>,

    /// Free-text note
    #[arg(long)]
    pub note: Option<String>,

    /// Initial status (defaults to the configured default status)
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<ReservationStatus>,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check the form before touching the store
        validate_all(&self.name, self.party_size, &self.date)?;
        if let Some(ref time) = self.time {
            validate_time(time)?;
        }

        // 2. Load configuration and open the store
        let config = load_configuration(global)?;
        let mut store = open_store(global, &config)?;

        // 3. Create and persist
        let reservation = Reservation::create(NewReservation {
            name: self.name,
            party_size: self.party_size,
            date: self.date,
            time: self.time.unwrap_or_default(),
            table: self.table.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
            status: Some(self.status.unwrap_or_else(|| config.default_status())),
        });
        store.add(&reservation)?;

        // 4. Output the new id
        println!("{}", reservation.id());

        global.logger.info(&format!(
            "Reserved for {} ({} guests) on {}",
            reservation.name(),
            reservation.party_size(),
            reservation.formatted_date()
        ));

        Ok(())
    }
}
