//! List command implementation.
//!
//! This module implements the `list` command, which displays stored
//! reservations in various formats (table, JSON, CSV, TSV), optionally
//! searched, filtered by status and sorted.

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_store, GlobalOptions};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use tablebook::config::OutputFormat;
use tablebook::{
    Reservation, ReservationQuery, ReservationStatus, ReservationSummary, SortField, SortOrder,
};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 10] = [
    "id",
    "name",
    "party_size",
    "date",
    "time",
    "table",
    "status",
    "note",
    "created_at",
    "updated_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured format)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Only show reservations with this status
    #[arg(long, value_enum, ignore_case = true)]
    pub status: Option<ReservationStatus>,

    /// Case-insensitive search over name, table, status and date
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort by field
    #[arg(long, value_enum)]
    pub sort: Option<SortField>,

    /// Sort in descending order
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Append totals (reservations, guests, confirmed)
    #[arg(long)]
    pub summary: bool,
}

/// JSON document emitted when `--summary` is combined with `--format json`.
#[derive(Serialize)]
struct ListingWithSummary<'a> {
    reservations: &'a [Reservation],
    summary: ReservationSummary,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;
        let format = self.format.unwrap_or_else(|| config.output_format());

        // 2. Open store
        let store = open_store(global, &config)?;

        // 3. Load and query
        let query = self.build_query();
        let reservations = query.apply(store.try_load()?);
        let summary = self.summary.then(|| ReservationSummary::of(&reservations));

        // 4. Format and output to stdout
        match format {
            OutputFormat::Table => format_as_table(&reservations, summary)?,
            OutputFormat::Json => format_as_json(&reservations, summary)?,
            OutputFormat::Csv => format_as_delimited(&reservations, b',')?,
            OutputFormat::Tsv => format_as_delimited(&reservations, b'\t')?,
        }

        // Delimited output stays machine-readable; totals go to stderr
        if let (Some(summary), OutputFormat::Csv | OutputFormat::Tsv) = (summary, format) {
            eprintln!("{}", summary_line(summary));
        }

        Ok(())
    }

    fn build_query(&self) -> ReservationQuery {
        let mut query = ReservationQuery::new();
        if let Some(ref text) = self.search {
            query = query.search(text.as_str());
        }
        if let Some(status) = self.status {
            query = query.status(status);
        }
        if let Some(field) = self.sort {
            let order = if self.desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            query = query.sort_by(field, order);
        }
        query
    }
}

fn summary_line(summary: ReservationSummary) -> String {
    format!(
        "TOTAL: {} reservations, {} guests, {} confirmed",
        summary.total, summary.total_people, summary.confirmed
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(
    reservations: &[Reservation],
    summary: Option<ReservationSummary>,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    // Print header (uppercase for table display), leaving out the note
    let header_line = COLUMN_HEADERS
        .iter()
        .filter(|h| **h != "note")
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for res in reservations {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            res.id(),
            res.name(),
            res.party_size(),
            res.date(),
            or_dash(res.time()),
            or_dash(res.table()),
            res.status(),
            format_timestamp(res.created_at()),
            format_timestamp(res.updated_at()),
        )?;
    }

    if let Some(summary) = summary {
        writeln!(handle, "{}", summary_line(summary))?;
    }

    Ok(())
}

/// Format reservations as JSON, in their persisted shape.
fn format_as_json(
    reservations: &[Reservation],
    summary: Option<ReservationSummary>,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let written = match summary {
        Some(summary) => serde_json::to_writer_pretty(
            &mut handle,
            &ListingWithSummary {
                reservations,
                summary,
            },
        ),
        None => serde_json::to_writer_pretty(&mut handle, reservations),
    };
    written.map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format reservations as delimited output (CSV or TSV).
fn format_as_delimited(reservations: &[Reservation], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for res in reservations {
        writer
            .write_record(&[
                res.id().to_string(),
                res.name().to_string(),
                res.party_size().to_string(),
                res.date().to_string(),
                res.time().to_string(),
                res.table().to_string(),
                res.status().to_string(),
                res.note().to_string(),
                format_timestamp(res.created_at()),
                format_timestamp(res.updated_at()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
