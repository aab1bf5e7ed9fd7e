//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddCommand, ClearCommand, CompletionsCommand, DeleteCommand, EditCommand, ExportCommand,
    ImportCommand, ListCommand, ShowCommand, ShowDataDirCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing restaurant table reservations.
#[derive(Parser)]
#[command(name = "tablebook")]
#[command(version, about = "Manage restaurant table reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "TABLEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "TABLEBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic store initialization
    #[arg(long, global = true, env = "TABLEBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate and store a new reservation
    Add(AddCommand),

    /// List reservations
    List(ListCommand),

    /// Show a single reservation
    Show(ShowCommand),

    /// Edit an existing reservation
    Edit(EditCommand),

    /// Delete a reservation
    Delete(DeleteCommand),

    /// Delete every reservation
    Clear(ClearCommand),

    /// Check form input without storing anything
    Validate(ValidateCommand),

    /// Print a reservation as a transfer bag
    Export(ExportCommand),

    /// Read a transfer bag and store the reservation it carries
    Import(ImportCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
