//! Output formatting for reports and raw trip rows.
//!
//! Supports a plain-text console rendering, JSON serialization, and CSV
//! output for windows of raw records.

use std::fmt::{self, Write as _};
use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::{Availability, Outcome};
use crate::loader;
use crate::pipeline::Report;
use crate::record::TripRecord;

const NO_DATA: &str = "no data for the current filter";
const NOT_AVAILABLE: &str = "not available for this dataset";

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Serializes the report as pretty-printed JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders the report as console text, one block per aggregator.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &Report) -> fmt::Result {
    let rule = "-".repeat(40);

    writeln!(out, "City: {}", report.city)?;
    writeln!(out, "Month(s): {}", report.months.join(", "))?;
    writeln!(out, "Day(s): {}", report.days.join(", "))?;
    writeln!(
        out,
        "Trips selected: {} of {}",
        report.selected_records, report.total_records
    )?;
    if report.negative_durations > 0 {
        writeln!(
            out,
            "Warning: {} trip(s) have a negative duration",
            report.negative_durations
        )?;
    }
    writeln!(out, "{rule}")?;

    writeln!(out, "\nMost frequent times of travel")?;
    match &report.time {
        Outcome::Data(t) => {
            writeln!(out, "  month: {} ({} trips)", t.month_name, t.month.count)?;
            writeln!(out, "  day:   {} ({} trips)", t.day_of_week.value, t.day_of_week.count)?;
            writeln!(out, "  hour:  {} ({} trips)", t.hour.value, t.hour.count)?;
        }
        Outcome::NoData => writeln!(out, "  {NO_DATA}")?,
    }

    writeln!(out, "\nMost popular stations and trip")?;
    match &report.stations {
        Outcome::Data(s) => {
            writeln!(out, "  start: {} ({} trips)", s.start_station.value, s.start_station.count)?;
            writeln!(out, "  end:   {} ({} trips)", s.end_station.value, s.end_station.count)?;
            writeln!(out, "  trip:  {} ({} trips)", s.trip.value, s.trip.count)?;
        }
        Outcome::NoData => writeln!(out, "  {NO_DATA}")?,
    }

    writeln!(out, "\nTrip duration")?;
    match &report.durations {
        Outcome::Data(d) => {
            writeln!(out, "  total: {}", d.total)?;
            writeln!(out, "  mean:  {}", d.mean)?;
        }
        Outcome::NoData => writeln!(out, "  {NO_DATA}")?,
    }

    writeln!(out, "\nUser stats")?;
    match &report.users {
        Outcome::Data(u) => {
            writeln!(out, "  user types:")?;
            write_counts(out, &u.user_types)?;
            match &u.gender {
                Availability::Available(counts) => {
                    writeln!(out, "  gender:")?;
                    write_counts(out, counts)?;
                }
                Availability::NotAvailable => writeln!(out, "  gender: {NOT_AVAILABLE}")?,
            }
            match &u.birth_year {
                Availability::Available(Outcome::Data(b)) => {
                    writeln!(out, "  earliest birth year:    {}", b.earliest)?;
                    writeln!(out, "  most recent birth year: {}", b.most_recent)?;
                    writeln!(out, "  most common birth year: {}", b.most_common)?;
                }
                Availability::Available(Outcome::NoData) => {
                    writeln!(out, "  birth year: {NO_DATA}")?
                }
                Availability::NotAvailable => writeln!(out, "  birth year: {NOT_AVAILABLE}")?,
            }
        }
        Outcome::NoData => writeln!(out, "  {NO_DATA}")?,
    }

    writeln!(out, "\n{rule}")?;
    for t in &report.timings {
        writeln!(out, "{:?} took {:.3} ms", t.stage, t.elapsed_ms)?;
    }
    Ok(())
}

fn write_counts(out: &mut String, counts: &IndexMap<String, usize>) -> fmt::Result {
    if counts.is_empty() {
        writeln!(out, "    {NO_DATA}")?;
    }
    for (label, count) in counts {
        writeln!(out, "    {label:<20} {count}")?;
    }
    Ok(())
}

/// A trip as it appears in the source export.
#[derive(Debug, Serialize)]
struct RawRow<'a> {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: &'a str,
    #[serde(rename = "End Station")]
    end_station: &'a str,
    #[serde(rename = "User Type")]
    user_type: Option<&'a str>,
    #[serde(rename = "Gender", skip_serializing_if = "Option::is_none")]
    gender: Option<Option<&'a str>>,
    #[serde(rename = "Birth Year", skip_serializing_if = "Option::is_none")]
    birth_year: Option<Option<i32>>,
}

/// Writes `records` as CSV with the source column names.
///
/// Demographic columns are emitted only when `with_demographics` is set, so
/// every row has the same shape.
pub fn write_raw_rows<W: Write>(
    writer: W,
    records: &[&TripRecord],
    with_demographics: bool,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);

    if records.is_empty() {
        let mut header = vec![
            loader::START_TIME,
            loader::TRIP_DURATION,
            loader::START_STATION,
            loader::END_STATION,
            loader::USER_TYPE,
        ];
        if with_demographics {
            header.extend([loader::GENDER, loader::BIRTH_YEAR]);
        }
        wtr.write_record(&header)?;
    }

    for r in records {
        wtr.serialize(RawRow {
            start_time: r.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            trip_duration: r.trip_duration_seconds,
            start_station: &r.start_station,
            end_station: &r.end_station,
            user_type: r.user_type.as_deref(),
            gender: with_demographics.then(|| r.gender.as_deref()),
            birth_year: with_demographics.then_some(r.birth_year),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
