//! Runs one analysis: load, filter, then every aggregator.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::{
    DurationStats, Outcome, StationStats, TimeStats, UserStats, duration_stats, station_stats,
    time_stats, user_stats,
};
use crate::config::{City, SourceConfig};
use crate::error::Result;
use crate::filter::{DaySelector, MonthSelector, Selector, View, filter};
use crate::loader;
use crate::record::{Capabilities, Dataset};

/// What to analyze: one city and the months/days to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub months: MonthSelector,
    pub days: DaySelector,
}

impl Selection {
    pub fn new(city: City, months: MonthSelector, days: DaySelector) -> Self {
        Selection { city, months, days }
    }

    /// Every month and day for `city`.
    pub fn everything(city: City) -> Self {
        Self::new(city, Selector::All, Selector::All)
    }

    /// Validates raw identifiers; empty month/day lists mean "all".
    pub fn parse<S: AsRef<str>>(city: &str, months: &[S], days: &[S]) -> Result<Self> {
        let months = if months.is_empty() {
            Selector::All
        } else {
            Selector::months(months)?
        };
        let days = if days.is_empty() {
            Selector::All
        } else {
            Selector::days(days)?
        };
        Ok(Self::new(city.parse()?, months, days))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Filter,
    Time,
    Stations,
    Durations,
    Users,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Everything computed for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub city: City,
    pub months: Vec<String>,
    pub days: Vec<String>,
    pub total_records: usize,
    pub selected_records: usize,
    pub negative_durations: usize,
    pub capabilities: Capabilities,
    pub time: Outcome<TimeStats>,
    pub stations: Outcome<StationStats>,
    pub durations: Outcome<DurationStats>,
    pub users: Outcome<UserStats>,
    pub timings: Vec<StageTiming>,
}

impl Report {
    pub fn timing(&self, stage: Stage) -> Option<&StageTiming> {
        self.timings.iter().find(|t| t.stage == stage)
    }
}

fn timed<T>(stage: Stage, timings: &mut Vec<StageTiming>, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(?stage, elapsed_ms, "Stage finished");
    timings.push(StageTiming { stage, elapsed_ms });
    out
}

/// Loads the selected city and computes the full report.
#[tracing::instrument(skip_all, fields(city = %selection.city))]
pub fn run(config: &SourceConfig, selection: &Selection) -> Result<Report> {
    let mut timings = Vec::new();
    let dataset = timed(Stage::Load, &mut timings, || {
        loader::load(config, selection.city)
    })?;

    let mut report = analyze(&dataset, selection);
    timings.append(&mut report.timings);
    report.timings = timings;
    Ok(report)
}

/// Computes the report for an already loaded dataset.
pub fn analyze(dataset: &Dataset, selection: &Selection) -> Report {
    let mut timings = Vec::new();
    let view = timed(Stage::Filter, &mut timings, || {
        filter(dataset, &selection.months, &selection.days)
    });

    let report = aggregate(&view, selection, &mut timings);
    info!(
        selected = report.selected_records,
        total = report.total_records,
        "Report computed"
    );
    Report { timings, ..report }
}

fn aggregate(view: &View, selection: &Selection, timings: &mut Vec<StageTiming>) -> Report {
    let dataset = view.dataset();
    Report {
        city: dataset.city,
        months: selection.months.labels(),
        days: selection.days.labels(),
        total_records: dataset.len(),
        selected_records: view.len(),
        negative_durations: dataset.negative_durations(),
        capabilities: dataset.capabilities,
        time: timed(Stage::Time, timings, || time_stats(view)),
        stations: timed(Stage::Stations, timings, || station_stats(view)),
        durations: timed(Stage::Durations, timings, || duration_stats(view)),
        users: timed(Stage::Users, timings, || user_stats(view)),
        timings: Vec::new(),
    }
}
