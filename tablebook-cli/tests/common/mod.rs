//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Date fixtures relative to today

use assert_cmd::Command;
use chrono::{Days, Local};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host settings into a test run.
const ISOLATED_VARS: [&str; 7] = [
    "TABLEBOOK_DATA_DIR",
    "TABLEBOOK_BUSY_TIMEOUT",
    "TABLEBOOK_DISABLE_AUTOINIT",
    "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "TABLEBOOK_OUTPUT_FORMAT",
    "TABLEBOOK_DEFAULT_STATUS",
    "TABLEBOOK_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the tablebook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created yet; the first store-backed
    /// command creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("tablebook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("tablebook").expect("Failed to find tablebook binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), content)
            .expect("Failed to write config");
    }

    /// Add a reservation and return its id.
    ///
    /// # Panics
    /// Panics if the add command fails or prints something other than an id.
    pub fn add(&self, name: &str, party_size: i32, date: &str, extra: &[&str]) -> String {
        let output = self
            .command()
            .arg("add")
            .arg("--name")
            .arg(name)
            .arg("--party-size")
            .arg(party_size.to_string())
            .arg("--date")
            .arg(date)
            .args(extra)
            .output()
            .expect("Failed to run add command");

        assert!(
            output.status.success(),
            "Add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let id = String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string();
        assert!(id.starts_with("RES_"), "Output is not an id: {id}");
        id
    }

    /// Add a reservation three days from now with default details.
    pub fn add_simple(&self, name: &str) -> String {
        self.add(name, 4, &days_from_today(3), &[])
    }

    /// Run `list` with extra arguments and return stdout.
    pub fn list(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("list")
            .args(args)
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Run `list --format json` and parse the result.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let stdout = self.list(&["--format", "json"]);
        serde_json::from_str(&stdout).expect("list output is not a JSON array")
    }
}

/// Formats a date `days` from today as `DD/MM/YYYY`.
#[allow(dead_code)]
pub fn days_from_today(days: u64) -> String {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date in range")
        .format("%d/%m/%Y")
        .to_string()
}
