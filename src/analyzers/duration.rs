use crate::analyzers::types::{DurationStats, Outcome};
use crate::analyzers::utility::{format_elapsed, mean};
use crate::filter::View;

/// Total and mean trip duration. Negative durations are summed as-is.
pub fn duration_stats(view: &View) -> Outcome<DurationStats> {
    let trips = view.len();
    let total: f64 = view.iter().map(|r| r.trip_duration_seconds).sum();
    let Some(avg) = mean(total, trips) else {
        return Outcome::NoData;
    };

    let total_seconds = total.trunc() as i64;
    let mean_seconds = avg.trunc() as i64;

    Outcome::Data(DurationStats {
        trips,
        total_seconds,
        mean_seconds,
        total: format_elapsed(total_seconds),
        mean: format_elapsed(mean_seconds),
    })
}
