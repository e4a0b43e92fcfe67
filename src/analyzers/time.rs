use crate::analyzers::types::{Outcome, Popular, TimeStats};
use crate::analyzers::utility::mode;
use crate::calendar::{month_name, weekday_name};
use crate::filter::View;

/// Most common month, weekday and start hour of the selected trips.
pub fn time_stats(view: &View) -> Outcome<TimeStats> {
    let Some(month) = mode(view.iter().map(|r| r.month())) else {
        return Outcome::NoData;
    };
    let Some(day) = mode(view.iter().map(|r| r.day_of_week())) else {
        return Outcome::NoData;
    };
    let Some(hour) = mode(view.iter().map(|r| r.hour())) else {
        return Outcome::NoData;
    };

    Outcome::Data(TimeStats {
        month_name: month_name(month.0).unwrap_or_default().to_string(),
        month: month.into(),
        day_of_week: Popular {
            value: weekday_name(day.0).to_string(),
            count: day.1,
        },
        hour: hour.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{dataset, trip};

    #[test]
    fn test_time_stats_modes() {
        let ds = dataset(vec![
            trip("2017-03-05 17:10:00", 10.0, "A", "B"), // Sunday
            trip("2017-03-06 17:20:00", 10.0, "A", "B"), // Monday
            trip("2017-04-03 08:00:00", 10.0, "A", "B"), // Monday
        ]);
        let stats = time_stats(&View::all(&ds)).data().cloned().unwrap();

        assert_eq!(stats.month, Popular { value: 3, count: 2 });
        assert_eq!(stats.month_name, "March");
        assert_eq!(stats.day_of_week.value, "Monday");
        assert_eq!(stats.hour, Popular { value: 17, count: 2 });
    }

    #[test]
    fn test_time_stats_tie_prefers_first_seen() {
        let ds = dataset(vec![
            trip("2017-02-02 09:00:00", 10.0, "A", "B"), // Thursday
            trip("2017-01-01 08:00:00", 10.0, "A", "B"), // Sunday
        ]);
        let stats = time_stats(&View::all(&ds)).data().cloned().unwrap();

        assert_eq!(stats.month.value, 2);
        assert_eq!(stats.day_of_week.value, "Thursday");
        assert_eq!(stats.hour.value, 9);
    }

    #[test]
    fn test_time_stats_empty_view() {
        let ds = dataset(vec![]);
        assert!(time_stats(&View::all(&ds)).is_no_data());
    }
}
