//! Validate command implementation.
//!
//! Runs the form checks (name, party size, date) and reports the first
//! failure. Nothing is stored, and the data directory is not touched.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use tablebook::validation::validate_all;

/// Check form input without storing anything.
#[derive(Args)]
pub struct ValidateCommand {
    /// Guest name
    #[arg(long)]
    pub name: String,

    /// Number of guests
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub party_size: i32,

    /// Reservation date
    #[arg(long, value_name = "DD/MM/YYYY")]
    pub date: String,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        validate_all(&self.name, self.party_size, &self.date)?;

        if !global.quiet {
            println!("OK");
        }

        Ok(())
    }
}
