//! Supported cities and where their trip data lives.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BikeshareError, Result};

pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

/// A city with a bike-share trip export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Identifier used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn default_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    /// Case-insensitive; `_` and `-` are accepted in place of spaces.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        City::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| BikeshareError::Configuration(s.to_string()))
    }
}

/// Maps each city to its source file inside a data directory.
///
/// File names default to the standard exports and can be overridden from a
/// JSON object keyed by city identifier:
/// ```json
/// {
///   "chicago": "chicago_2017.csv",
///   "new york city": "nyc.csv.gz"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SourceConfig {
    data_dir: PathBuf,
    files: HashMap<City, String>,
}

impl SourceConfig {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            files: HashMap::new(),
        }
    }

    /// Uses `BIKESHARE_DATA_DIR` when set, otherwise `./data`.
    pub fn from_env() -> Self {
        let data_dir =
            std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::new(data_dir)
    }

    /// Applies file-name overrides from a JSON file at `path`.
    pub fn with_overrides_from(mut self, path: &Path) -> Result<Self> {
        let config_err = |message: String| BikeshareError::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let entries: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| config_err(e.to_string()))?;

        for (key, file) in entries {
            let city: City = key
                .parse()
                .map_err(|_| config_err(format!("unknown city '{key}'")))?;
            self.files.insert(city, file);
        }
        Ok(self)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, city: City) -> PathBuf {
        let file = self
            .files
            .get(&city)
            .map(String::as_str)
            .unwrap_or(city.default_file());
        self.data_dir.join(file)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
