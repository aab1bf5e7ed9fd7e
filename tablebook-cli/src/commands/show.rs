//! Show command implementation.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_store, GlobalOptions};
use clap::Args;
use tablebook::Error as LibError;

/// Show a single reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let res = store.get(&self.id)?.ok_or_else(|| LibError::NotFound {
            resource: format!("reservation {}", self.id),
        })?;

        let dash = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        println!("ID:          {}", res.id());
        println!("Name:        {}", res.name());
        println!("Party size:  {}", res.party_size());
        println!("Date:        {}", res.formatted_date());
        println!("Time:        {}", dash(&res.formatted_time()));
        println!("Table:       {}", dash(res.table()));
        println!("Note:        {}", dash(res.note()));
        println!("Status:      {}", res.status());
        println!("Created:     {}", format_timestamp(res.created_at()));
        println!("Updated:     {}", format_timestamp(res.updated_at()));

        Ok(())
    }
}
