//! Summary statistics over a filtered view of trips.
//!
//! Each aggregator is a pure function of a [`View`](crate::filter::View) and
//! returns [`Outcome::NoData`] instead of failing when the view is empty.

pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;

pub use duration::duration_stats;
pub use station::station_stats;
pub use time::time_stats;
pub use types::{
    Availability, BirthYearStats, DurationStats, Outcome, Popular, StationStats, TimeStats,
    UserStats,
};
pub use users::user_stats;
