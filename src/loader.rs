//! Reads a city's trip export into a [`Dataset`].
//!
//! Columns are located by header name, so extra columns such as the unnamed
//! index column or `End Time` are ignored. `Gender` and `Birth Year` are
//! optional; their presence sets the dataset's capability flags.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use tracing::{debug, info, warn};

use crate::calendar::parse_timestamp;
use crate::config::{City, SourceConfig};
use crate::error::{BikeshareError, Result};
use crate::record::{Capabilities, Dataset, TripRecord};

pub const START_TIME: &str = "Start Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Column positions resolved from the header row.
struct Columns {
    start_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                BikeshareError::parse(path, 0, format!("missing required column '{name}'"))
            })
        };

        Ok(Columns {
            start_time: require(START_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            has_gender: self.gender.is_some(),
            has_birth_year: self.birth_year.is_some(),
        }
    }
}

/// Loads the configured source for `city`.
#[tracing::instrument(skip_all, fields(city = %city))]
pub fn load(config: &SourceConfig, city: City) -> Result<Dataset> {
    let path = resolve_source(&config.path_for(city));
    debug!(path = %path.display(), "Opening trip source");

    let reader = open_source(&path).map_err(|source| BikeshareError::SourceUnavailable {
        city: city.to_string(),
        path: path.clone(),
        source,
    })?;

    let dataset = read_dataset(city, reader, &path)?;

    info!(
        records = dataset.len(),
        has_gender = dataset.capabilities.has_gender,
        has_birth_year = dataset.capabilities.has_birth_year,
        "Trip data loaded"
    );
    Ok(dataset)
}

/// Convenience wrapper for callers holding a raw city identifier.
pub fn load_by_name(config: &SourceConfig, city: &str) -> Result<Dataset> {
    load(config, city.parse()?)
}

/// Falls back to a gzip sibling (`<file>.gz`) when the plain file is absent.
fn resolve_source(path: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }
    let mut gz = path.as_os_str().to_owned();
    gz.push(".gz");
    let gz = PathBuf::from(gz);
    if gz.exists() { gz } else { path.to_path_buf() }
}

fn open_source(path: &Path) -> std::io::Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Parses CSV trip rows from any reader. `path` is only used for error context.
pub fn read_dataset<R: Read>(city: City, reader: R, path: &Path) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| csv_error(e, city, path, 0))?
        .clone();
    let columns = Columns::resolve(&headers, path)?;
    let capabilities = columns.capabilities();

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i as u64 + 1;
        let raw = result.map_err(|e| csv_error(e, city, path, row))?;
        let record = parse_row(&raw, &columns, path, row)?;

        if record.trip_duration_seconds < 0.0 {
            warn!(
                row,
                duration = record.trip_duration_seconds,
                "Negative trip duration kept as-is"
            );
        }
        records.push(record);
    }

    Ok(Dataset::new(city, capabilities, records))
}

fn parse_row(raw: &StringRecord, columns: &Columns, path: &Path, row: u64) -> Result<TripRecord> {
    let cell = |idx: usize| raw.get(idx).unwrap_or("");
    let optional = |idx: Option<usize>| {
        idx.map(cell)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let start_raw = cell(columns.start_time);
    let start_time = parse_timestamp(start_raw).ok_or_else(|| {
        BikeshareError::parse(path, row, format!("unparseable start time '{start_raw}'"))
    })?;

    let duration_raw = cell(columns.trip_duration);
    let trip_duration_seconds = duration_raw
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| {
            BikeshareError::parse(path, row, format!("invalid trip duration '{duration_raw}'"))
        })?;

    let station = |idx: usize, name: &str| {
        let value = cell(idx);
        if value.is_empty() {
            return Err(BikeshareError::parse(path, row, format!("blank '{name}' cell")));
        }
        Ok(value)
    };
    let start_station = station(columns.start_station, START_STATION)?;
    let end_station = station(columns.end_station, END_STATION)?;

    let birth_year = optional(columns.birth_year)
        .map(|v| parse_birth_year(&v).ok_or_else(|| {
            BikeshareError::parse(path, row, format!("invalid birth year '{v}'"))
        }))
        .transpose()?;

    Ok(TripRecord::new(
        start_time,
        trip_duration_seconds,
        start_station,
        end_station,
        optional(Some(columns.user_type)),
    )
    .with_demographics(optional(columns.gender), birth_year))
}

/// Exports store birth years as floats (`1989.0`).
fn parse_birth_year(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|y| y.is_finite() && y.fract() == 0.0)
        .map(|y| y as i32)
}

fn csv_error(err: csv::Error, city: City, path: &Path, row: u64) -> BikeshareError {
    if err.is_io_error() {
        if let csv::ErrorKind::Io(source) = err.into_kind() {
            return BikeshareError::SourceUnavailable {
                city: city.to_string(),
                path: path.to_path_buf(),
                source,
            };
        }
        return BikeshareError::parse(path, row, "unreadable row");
    }
    BikeshareError::parse(path, row, err.to_string())
}
