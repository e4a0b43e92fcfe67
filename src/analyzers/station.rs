use crate::analyzers::types::{Outcome, StationStats};
use crate::analyzers::utility::mode;
use crate::filter::View;

/// Most used start station, end station and directed start/end pair.
pub fn station_stats(view: &View) -> Outcome<StationStats> {
    let Some(start) = mode(view.iter().map(|r| r.start_station.as_str())) else {
        return Outcome::NoData;
    };
    let Some(end) = mode(view.iter().map(|r| r.end_station.as_str())) else {
        return Outcome::NoData;
    };
    let Some(trip) = mode(view.iter().map(|r| trip_key(&r.start_station, &r.end_station))) else {
        return Outcome::NoData;
    };

    Outcome::Data(StationStats {
        start_station: (start.0.to_string(), start.1).into(),
        end_station: (end.0.to_string(), end.1).into(),
        trip: trip.into(),
    })
}

pub fn trip_key(start: &str, end: &str) -> String {
    format!("{start} to {end}")
}
