//! Export command implementation.
//!
//! Encodes a stored reservation as a transfer bag and prints it as JSON, so
//! it can be handed to `import` on another data directory. The bag also
//! records who produced it, when, and in which layout version.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use tablebook::{Error as LibError, SystemClock, TransferAction, TransferCodec, TransferParams};

/// Print a reservation as a transfer bag.
#[derive(Args)]
pub struct ExportCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Action hint carried in the bag
    #[arg(long, value_enum, default_value_t = TransferAction::View, ignore_case = true)]
    pub action: TransferAction,
}

impl ExportCommand {
    /// Execute the export command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let reservation = store.get(&self.id)?.ok_or_else(|| LibError::NotFound {
            resource: format!("reservation {}", self.id),
        })?;

        let mut bag = TransferCodec::default().encode_with_action(&reservation, self.action);
        TransferParams::new("tablebook", &SystemClock).write_to(&mut bag);
        let json = serde_json::to_string_pretty(&bag).map_err(LibError::from)?;
        println!("{json}");

        Ok(())
    }
}
