//! Result types produced by the aggregators.

use indexmap::IndexMap;
use serde::Serialize;

/// A computed section, or a marker that the filtered view had no trips.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Data(T),
    NoData,
}

impl<T> Outcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Data(v) => Some(v),
            Outcome::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Outcome::NoData)
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Outcome::NoData, Outcome::Data)
    }
}

/// A sub-report that depends on an optional source column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    NotAvailable,
}

impl<T> Availability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::NotAvailable => None,
        }
    }
}

/// The most frequent value and how many trips had it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

impl<T> From<(T, usize)> for Popular<T> {
    fn from((value, count): (T, usize)) -> Self {
        Popular { value, count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Month number, 1-12.
    pub month: Popular<u32>,
    pub month_name: String,
    pub day_of_week: Popular<String>,
    pub hour: Popular<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start_station: Popular<String>,
    pub end_station: Popular<String>,
    /// Rendered as `"<start> to <end>"`.
    pub trip: Popular<String>,
}

/// Totals are truncated toward zero to whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: i64,
    pub mean_seconds: i64,
    pub total: String,
    pub mean: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Trips per user type, most frequent first.
    pub user_types: IndexMap<String, usize>,
    pub gender: Availability<IndexMap<String, usize>>,
    /// `NoData` when the column exists but every selected cell is blank.
    pub birth_year: Availability<Outcome<BirthYearStats>>,
}
