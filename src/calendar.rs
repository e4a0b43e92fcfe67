//! Timestamp parsing and the calendar fields derived from a trip's start time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Months covered by the trip exports, January through June.
pub const MONTH_NAMES: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Calendar fields computed once per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFields {
    /// 1-based month number.
    pub month: u32,
    pub day_of_week: Weekday,
    /// Hour of day, 0-23.
    pub hour: u32,
}

impl DerivedFields {
    pub fn from_start(start: &NaiveDateTime) -> Self {
        DerivedFields {
            month: start.month(),
            day_of_week: start.weekday(),
            hour: start.hour(),
        }
    }
}

/// Parses a start-time cell. Returns `None` when no supported layout matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Full English weekday name, e.g. `Sunday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Capitalized month name for any month number, e.g. `March`.
pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Month number for a lowercase name in the supported range.
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    DAY_NAMES
        .iter()
        .position(|d| *d == name)
        .map(|i| WEEKDAYS[i])
}
