//! The local settings area: a `SQLite`-backed key/value table.
//!
//! Values are opaque strings. Callers that need a read-modify-write cycle
//! run it through [`SettingsArea::with_immediate`], which holds an
//! `IMMEDIATE` transaction so another process cannot interleave a write.

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::StoreConfig;
use super::schema::{DELETE_SETTING, SELECT_SETTING, UPSERT_SETTING};

/// A handle on the settings database.
///
/// # Examples
///
/// ```
/// use tablebook::store::SettingsArea;
///
/// let mut settings = SettingsArea::open_in_memory().unwrap();
/// settings.put("greeting", "hello").unwrap();
/// assert_eq!(settings.get("greeting").unwrap().as_deref(), Some("hello"));
/// ```
#[derive(Debug)]
pub struct SettingsArea {
    conn: Connection,
    config: Option<StoreConfig>,
}

impl SettingsArea {
    /// Opens the settings database described by `config`.
    ///
    /// This will create the parent directory when auto-creating, apply WAL
    /// journaling and the busy timeout, and initialize or verify the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataDirectoryNotFound`] if the file is missing and
    /// auto-creation is off, or an error if the database cannot be opened
    /// or its schema is incompatible.
    pub fn open(config: StoreConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config
                        .path
                        .parent()
                        .map_or_else(|| config.path.clone(), std::path::Path::to_path_buf),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        if !config.read_only {
            // PRAGMA journal_mode returns a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }
        conn.busy_timeout(config.busy_timeout)?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self {
            conn,
            config: Some(config),
        })
    }

    /// Opens a private in-memory settings area.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self { conn, config: None })
    }

    /// Returns the configuration this area was opened with, if on disk.
    #[must_use]
    pub const fn config(&self) -> Option<&StoreConfig> {
        self.config.as_ref()
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        read_value(&self.conn, key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put(&mut self, key: &str, value: &str) -> Result<()> {
        write_value(&self.conn, key, value).map_err(|e| self.lock_error(e))
    }

    /// Deletes `key`. Returns whether a value was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        delete_value(&self.conn, key).map_err(|e| self.lock_error(e))
    }

    /// Runs `f` inside an `IMMEDIATE` transaction and commits if it succeeds.
    ///
    /// The write lock is taken up front, so a concurrent writer either waits
    /// for the busy timeout or fails with [`Error::LockTimeout`].
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a database error if the
    /// transaction cannot be started or committed.
    pub fn with_immediate<T>(&mut self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let result = (|| -> Result<T> {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })();
        result.map_err(|e| self.lock_error(e))
    }

    /// Maps `SQLITE_BUSY` to [`Error::LockTimeout`].
    fn lock_error(&self, err: Error) -> Error {
        match err {
            Error::Database(rusqlite::Error::SqliteFailure(ref sqlite_err, _))
                if sqlite_err.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                Error::LockTimeout {
                    seconds: self
                        .config
                        .as_ref()
                        .map_or(0, |config| config.busy_timeout.as_secs()),
                }
            }
            other => other,
        }
    }
}

/// Reads a setting through any connection or transaction.
pub(crate) fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row(SELECT_SETTING, params![key], |row| row.get(0))
        .optional()?)
}

/// Writes a setting through any connection or transaction.
pub(crate) fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(UPSERT_SETTING, params![key, value])?;
    Ok(())
}

/// Deletes a setting through any connection or transaction.
pub(crate) fn delete_value(conn: &Connection, key: &str) -> Result<bool> {
    Ok(conn.execute(DELETE_SETTING, params![key])? > 0)
}
