//! In-memory trip records and the per-city dataset that owns them.

use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;

use crate::calendar::DerivedFields;
use crate::config::City;

/// One bike rental.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub trip_duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    /// `None` when the cell was blank.
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    derived: DerivedFields,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: Option<String>,
    ) -> Self {
        TripRecord {
            derived: DerivedFields::from_start(&start_time),
            start_time,
            trip_duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type,
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_demographics(mut self, gender: Option<String>, birth_year: Option<i32>) -> Self {
        self.gender = gender;
        self.birth_year = birth_year;
        self
    }

    pub fn month(&self) -> u32 {
        self.derived.month
    }

    pub fn day_of_week(&self) -> Weekday {
        self.derived.day_of_week
    }

    pub fn hour(&self) -> u32 {
        self.derived.hour
    }
}

/// Which optional demographic columns the source carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// All trips for one city, in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub city: City,
    pub capabilities: Capabilities,
    records: Vec<TripRecord>,
    negative_durations: usize,
}

impl Dataset {
    pub fn new(city: City, capabilities: Capabilities, records: Vec<TripRecord>) -> Self {
        let negative_durations = records
            .iter()
            .filter(|r| r.trip_duration_seconds < 0.0)
            .count();
        Dataset {
            city,
            capabilities,
            records,
            negative_durations,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of trips with a negative duration; they are kept as-is.
    pub fn negative_durations(&self) -> usize {
        self.negative_durations
    }
}
