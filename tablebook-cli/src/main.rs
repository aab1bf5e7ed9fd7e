//! Main entry point for the tablebook CLI.
//!
//! This is the command-line interface for the tablebook reservation store.
//! It provides commands for managing reservations:
//! - `add`: Validate and store a reservation
//! - `list`: List, search and sort reservations
//! - `edit` / `delete` / `clear`: Change stored reservations
//! - `export` / `import`: Move reservations as transfer bags

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library log records to stderr according to verbosity
    let logger = tablebook::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        // Commands still report through `logger`; only library records are lost
        logger.warn(&format!("Library logging unavailable: {e}"));
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        logger,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Add(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Edit(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Clear(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Export(cmd) => cmd.execute(&global),
        cli::Command::Import(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
