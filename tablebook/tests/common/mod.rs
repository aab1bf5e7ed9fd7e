//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the tablebook library.

pub mod store;

use chrono::{Days, Local, NaiveDate};
use tablebook::{Reservation, ReservationStatus};

/// Formats a date the way the validation rules expect (`dd/MM/yyyy`).
#[allow(dead_code)]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Returns a date `days` ahead of today, formatted for a reservation.
#[allow(dead_code)]
pub fn days_from_today(days: u64) -> String {
    let date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date within chrono range");
    format_date(date)
}

/// Builder for creating test reservations with sensible defaults.
#[allow(dead_code)]
pub struct ReservationFixture {
    id: Option<String>,
    name: String,
    party_size: i32,
    date: String,
    time: String,
    table: String,
    note: String,
    status: ReservationStatus,
    created_at: i64,
    updated_at: Option<i64>,
}

#[allow(dead_code)]
impl ReservationFixture {
    /// Creates a new fixture builder with default values.
    ///
    /// Defaults:
    /// - name: "John Doe", party size 4, date "15/12/2024", time "19:00"
    /// - table: "Table 1", empty note, status Confirmed
    /// - timestamps: 1000
    pub fn new() -> Self {
        Self {
            id: None,
            name: "John Doe".into(),
            party_size: 4,
            date: "15/12/2024".into(),
            time: "19:00".into(),
            table: "Table 1".into(),
            note: String::new(),
            status: ReservationStatus::Confirmed,
            created_at: 1_000,
            updated_at: None,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the guest name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the party size.
    pub fn with_party_size(mut self, party_size: i32) -> Self {
        self.party_size = party_size;
        self
    }

    /// Sets the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the table label.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds the reservation.
    ///
    /// # Panics
    ///
    /// Panics if the fixture violates the builder's rules. This is
    /// acceptable in test code where we want to fail fast on invalid fixtures.
    pub fn build(self) -> Reservation {
        let mut builder = Reservation::builder(self.name, self.party_size, self.date)
            .time(self.time)
            .table(self.table)
            .note(self.note)
            .status(self.status)
            .created_at(self.created_at)
            .updated_at(self.updated_at.unwrap_or(self.created_at));

        if let Some(id) = self.id {
            builder = builder.id(id);
        }

        builder
            .build()
            .expect("fixture should build valid reservation")
    }
}

impl Default for ReservationFixture {
    fn default() -> Self {
        Self::new()
    }
}
