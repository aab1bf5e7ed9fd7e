//! Delete command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;

/// Delete a reservation.
#[derive(Args)]
pub struct DeleteCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl DeleteCommand {
    /// Execute the delete command.
    ///
    /// Every stored entry carrying the id is removed.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut store = open_store(global, &config)?;

        let removed = store.remove(&self.id)?;
        if removed == 0 {
            return Err(CliError::SemanticFailure(format!(
                "No reservation with id {}",
                self.id
            )));
        }

        global
            .logger
            .info(&format!("Deleted {removed} reservation(s) with id {}", self.id));

        Ok(())
    }
}
