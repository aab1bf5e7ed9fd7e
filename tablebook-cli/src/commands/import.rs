//! Import command implementation.
//!
//! Reads a transfer bag as a JSON object from a file or stdin, decodes it
//! through the codec's fallback chain and appends the result to the store.
//! Gaps in the decoded reservation (missing time or table) are reported
//! as warnings and do not block the import. With `--placeholder`, a bag
//! carrying no reservation stores a placeholder booking instead of failing.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;
use tablebook::{TransferBag, TransferCodec};

/// Read a transfer bag and store the reservation it carries.
#[derive(Args)]
pub struct ImportCommand {
    /// File holding the bag (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Store a placeholder booking when the bag carries no reservation
    #[arg(long)]
    pub placeholder: bool,
}

impl ImportCommand {
    /// Execute the import command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Read and parse the bag
        let text = self.read_input()?;
        let bag: TransferBag = serde_json::from_str(&text).map_err(|e| {
            CliError::InvalidArguments(format!("input is not a JSON object: {e}"))
        })?;

        // 2. Decode
        let codec = TransferCodec::default();
        let params = codec.additional_params(&bag);
        global.logger.info(&format!(
            "Bag from {} (version {}, produced at {})",
            params.source, params.data_version, params.timestamp
        ));

        let reservation = if self.placeholder {
            codec.decode_or_placeholder(&bag)
        } else {
            codec.decode(&bag).ok_or_else(|| {
                CliError::SemanticFailure("input does not carry a reservation".to_string())
            })?
        };

        if let Err(warning) = codec.validate_decoded(&reservation) {
            global
                .logger
                .warn(&format!("{}: {}", warning.field, warning.message));
        }

        // 3. Store
        let config = load_configuration(global)?;
        let mut store = open_store(global, &config)?;
        store.add(&reservation)?;

        println!("{}", reservation.id());

        Ok(())
    }

    fn read_input(&self) -> Result<String, CliError> {
        match self.file {
            Some(ref path) if path.as_os_str() != "-" => {
                std::fs::read_to_string(path).map_err(CliError::from)
            }
            _ => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}
