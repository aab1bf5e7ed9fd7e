//! Settings-area schema definitions and SQL constants.
//!
//! The settings area is a plain key/value table. Each value is an opaque
//! text blob; the reservation collection is one such blob.

/// Current schema version for the settings database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Settings key under which the reservation collection is stored.
pub const RESERVATIONS_KEY: &str = "reservations";

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the settings table.
pub const CREATE_SETTINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to read one setting.
pub const SELECT_SETTING: &str = "SELECT value FROM settings WHERE key = ?";

/// SQL statement to write one setting, replacing any previous value.
pub const UPSERT_SETTING: &str = "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)";

/// SQL statement to delete one setting.
pub const DELETE_SETTING: &str = "DELETE FROM settings WHERE key = ?";
