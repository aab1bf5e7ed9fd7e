//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `add`: Validate and store a new reservation
//! - `list`: List reservations with search, status filter and sorting
//! - `show`: Display one reservation with formatted date and time
//! - `edit`: Apply changes to a stored reservation
//! - `delete`: Remove a reservation by id
//! - `clear`: Remove every reservation
//! - `validate`: Check form input without storing it
//! - `export`: Encode a reservation as a transfer bag
//! - `import`: Decode a transfer bag and store the reservation
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod add;
pub mod clear;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod show;
pub mod show_data_dir;
pub mod validate;

pub use add::AddCommand;
pub use clear::ClearCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use edit::EditCommand;
pub use export::ExportCommand;
pub use import::ImportCommand;
pub use list::ListCommand;
pub use show::ShowCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use validate::ValidateCommand;
