use std::fs;
use std::path::PathBuf;

use bikeshare_stats::BikeshareError;
use bikeshare_stats::analyzers::{Availability, BirthYearStats, Outcome};
use bikeshare_stats::config::{City, SourceConfig};
use bikeshare_stats::filter::{Selector, View, filter};
use bikeshare_stats::loader::load;
use bikeshare_stats::output::render_text;
use bikeshare_stats::pipeline::{Selection, Stage, analyze, run};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config() -> SourceConfig {
    SourceConfig::new(fixtures())
}

#[test]
fn test_full_pipeline_chicago() {
    let report = run(&config(), &Selection::everything(City::Chicago)).expect("report");

    assert_eq!(report.total_records, 6);
    assert_eq!(report.selected_records, 6);

    let time = report.time.data().unwrap();
    assert_eq!(time.month.value, 1);
    assert_eq!(time.day_of_week.value, "Sunday");
    assert_eq!(time.hour.value, 8);

    let stations = report.stations.data().unwrap();
    assert_eq!(stations.start_station.value, "A");
    assert_eq!(stations.end_station.value, "A");
    assert_eq!(stations.end_station.count, 3);
    assert_eq!(stations.trip.value, "A to B");

    let durations = report.durations.data().unwrap();
    assert_eq!(durations.total_seconds, 91_000);
    assert_eq!(durations.total, "1 day, 1:16:40");
    assert_eq!(durations.mean_seconds, 15_166);
    assert_eq!(durations.mean, "4:12:46");

    let users = report.users.data().unwrap();
    assert_eq!(users.user_types.get("Subscriber"), Some(&4));
    assert_eq!(users.user_types.get("Customer"), Some(&2));
    let gender = users.gender.available().unwrap();
    assert_eq!(gender.get_index(0), Some((&"Male".to_string(), &2)));
    assert_eq!(gender.get("Female"), Some(&2));
    assert_eq!(
        users.birth_year,
        Availability::Available(Outcome::Data(BirthYearStats {
            earliest: 1975,
            most_recent: 1992,
            most_common: 1989,
        }))
    );

    assert!(report.timing(Stage::Load).is_some());
    assert_eq!(report.timings.len(), 6);
}

#[test]
fn test_month_and_day_selection() {
    let selection = Selection::parse("chicago", &["june"], &["monday"]).unwrap();
    let report = run(&config(), &selection).unwrap();

    assert_eq!(report.selected_records, 2);
    let durations = report.durations.data().unwrap();
    assert_eq!(durations.total, "1 day, 1:00:00");
    assert_eq!(durations.mean, "12:30:00");

    let stations = report.stations.data().unwrap();
    assert_eq!(stations.start_station.value, "B");
    assert_eq!(stations.end_station.value, "Clark St");
    assert_eq!(stations.trip.value, "B to Clark St");
}

#[test]
fn test_washington_has_no_demographics() {
    let report = run(&config(), &Selection::everything(City::Washington)).unwrap();

    assert!(!report.capabilities.has_gender);
    assert_eq!(report.negative_durations, 1);

    let users = report.users.data().unwrap();
    assert_eq!(users.gender, Availability::NotAvailable);
    assert_eq!(users.birth_year, Availability::NotAvailable);

    let durations = report.durations.data().unwrap();
    assert_eq!(durations.total, "0:11:30");
    assert_eq!(durations.mean, "0:03:50");

    let text = render_text(&report);
    assert!(text.contains("gender: not available for this dataset"));
}

#[test]
fn test_empty_selection_degrades_every_section() {
    let selection = Selection::parse("washington", &["january"], &[]).unwrap();
    let report = run(&config(), &selection).unwrap();

    assert_eq!(report.selected_records, 0);
    assert!(report.time.is_no_data());
    assert!(report.stations.is_no_data());
    assert!(report.durations.is_no_data());
    assert!(report.users.is_no_data());
}

#[test]
fn test_filter_composition_is_order_independent() {
    let dataset = load(&config(), City::Chicago).unwrap();
    let months = Selector::months(&["january", "june"]).unwrap();
    let days = Selector::days(&["sunday", "monday"]).unwrap();

    let month_first = View::all(&dataset).retain_months(&months).retain_days(&days);
    let day_first = View::all(&dataset).retain_days(&days).retain_months(&months);
    assert_eq!(month_first.indices(), day_first.indices());
    assert_eq!(month_first.indices(), filter(&dataset, &months, &days).indices());

    let selection = Selection::new(City::Chicago, months, days);
    let report = analyze(&dataset, &selection);
    assert_eq!(report.selected_records, month_first.len());
}

#[test]
fn test_city_file_overrides() {
    let config = config()
        .with_overrides_from(&fixtures().join("cities.json"))
        .unwrap();
    let dataset = load(&config, City::NewYorkCity).unwrap();

    assert_eq!(dataset.city, City::NewYorkCity);
    assert_eq!(dataset.len(), 3);
}

#[test]
fn test_missing_source() {
    let err = load(&config(), City::NewYorkCity).unwrap_err();
    assert!(matches!(err, BikeshareError::SourceUnavailable { .. }));
}

#[test]
fn test_malformed_timestamp_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let good = fs::read_to_string(fixtures().join("washington.csv")).unwrap();
    fs::write(
        dir.path().join("washington.csv"),
        format!("{good}3,03/06/2017 noon,,60,X,Y,Subscriber\n"),
    )
    .unwrap();

    let err = load(&SourceConfig::new(dir.path()), City::Washington).unwrap_err();
    match err {
        BikeshareError::Parse { row, message, .. } => {
            assert_eq!(row, 4);
            assert!(message.contains("03/06/2017 noon"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_raw_window_pages() {
    let dataset = load(&config(), City::Chicago).unwrap();
    let view = filter(&dataset, &Selector::All, &Selector::All);

    let first = view.window(0, 5);
    assert_eq!(first.len(), 5);
    assert_eq!(first[0].start_station, "A");
    assert_eq!(view.window(5, 5).len(), 1);
    assert_eq!(view.pages(5).count(), 2);
}
