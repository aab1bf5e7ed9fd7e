//! Filtering, sorting and summarizing a loaded reservation list.

use std::cmp::Ordering;

use serde::Serialize;

use crate::reservation::{Reservation, ReservationStatus};
use crate::validation::parse_date;

/// Field a list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum SortField {
    /// Guest name, ignoring case.
    Name,
    /// Calendar date; unparseable dates sort after valid ones.
    Date,
    /// Time of day.
    Time,
    /// Status name.
    Status,
    /// Number of guests.
    PartySize,
    /// Creation time.
    Created,
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// A search, status filter and sort applied to a reservation list.
///
/// The search is a case-insensitive substring match against the name,
/// table, status and date. Sorting is stable, so ties keep their stored
/// order.
///
/// # Examples
///
/// ```
/// use tablebook::query::{ReservationQuery, SortField, SortOrder};
/// use tablebook::{Reservation, ReservationStatus};
///
/// let list = vec![
///     Reservation::builder("Budi", 6, "17/12/2024").build().unwrap(),
///     Reservation::builder("Ana", 2, "01/12/2024").build().unwrap(),
/// ];
///
/// let result = ReservationQuery::new()
///     .sort_by(SortField::Date, SortOrder::Ascending)
///     .apply(list);
/// assert_eq!(result[0].name(), "Ana");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationQuery {
    search: Option<String>,
    status: Option<ReservationStatus>,
    sort: Option<(SortField, SortOrder)>,
}

impl ReservationQuery {
    /// Creates a query that keeps everything in stored order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only reservations matching `text`. Blank text matches all.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        };
        self
    }

    /// Keeps only reservations with the given status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Orders the result.
    #[must_use]
    pub const fn sort_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }

    /// Returns `true` if `reservation` passes the search and status filter.
    #[must_use]
    pub fn matches(&self, reservation: &Reservation) -> bool {
        if self.status.is_some_and(|status| reservation.status() != status) {
            return false;
        }

        self.search.as_deref().map_or(true, |needle| {
            [
                reservation.name(),
                reservation.table(),
                reservation.status().as_str(),
                reservation.date(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
        })
    }

    /// Filters and sorts `reservations`.
    #[must_use]
    pub fn apply(&self, reservations: Vec<Reservation>) -> Vec<Reservation> {
        let mut result: Vec<Reservation> = reservations
            .into_iter()
            .filter(|r| self.matches(r))
            .collect();

        if let Some((field, order)) = self.sort {
            result.sort_by(|a, b| {
                let ordering = compare(field, a, b);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        result
    }
}

fn compare(field: SortField, a: &Reservation, b: &Reservation) -> Ordering {
    match field {
        SortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortField::Date => match (parse_date(a.date()), parse_date(b.date())) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.date().cmp(b.date()),
        },
        SortField::Time => a.time().cmp(b.time()),
        SortField::Status => a.status().as_str().cmp(b.status().as_str()),
        SortField::PartySize => a.party_size().cmp(&b.party_size()),
        SortField::Created => a.created_at().cmp(&b.created_at()),
    }
}

/// Headline numbers for a reservation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReservationSummary {
    /// Number of reservations.
    pub total: usize,
    /// Sum of party sizes.
    pub total_people: i64,
    /// Number of confirmed reservations.
    pub confirmed: usize,
}

impl ReservationSummary {
    /// Summarizes `reservations`.
    #[must_use]
    pub fn of(reservations: &[Reservation]) -> Self {
        reservations.iter().fold(Self::default(), |mut summary, r| {
            summary.total += 1;
            summary.total_people += i64::from(r.party_size());
            if r.status() == ReservationStatus::Confirmed {
                summary.confirmed += 1;
            }
            summary
        })
    }
}
