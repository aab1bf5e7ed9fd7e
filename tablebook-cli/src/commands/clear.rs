//! Clear command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;

/// Delete every reservation.
///
/// Also recovers a store whose reservation list can no longer be read.
#[derive(Args)]
pub struct ClearCommand {
    /// Confirm that every reservation should be deleted
    #[arg(long)]
    pub yes: bool,
}

impl ClearCommand {
    /// Execute the clear command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.yes {
            return Err(CliError::InvalidArguments(
                "clear deletes every reservation; pass --yes to confirm".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut store = open_store(global, &config)?;
        store.clear()?;

        global.logger.info("Cleared all reservations");

        Ok(())
    }
}
