//! Error taxonomy for loading and filtering trip data.
//!
//! Empty filter results and missing demographic columns are not errors; they
//! surface as [`Outcome::NoData`](crate::analyzers::Outcome) and
//! [`Availability::NotAvailable`](crate::analyzers::Availability) in the report.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    /// The city identifier is not one of the supported cities.
    #[error("unsupported city '{0}' (expected one of: chicago, new york city, washington)")]
    Configuration(String),

    /// The source file for a city could not be opened or read.
    #[error("source for {city} is unavailable at '{path}': {source}")]
    SourceUnavailable {
        city: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record in the source could not be parsed; the whole load is aborted.
    #[error("failed to parse '{path}' at row {row}: {message}")]
    Parse {
        path: PathBuf,
        row: u64,
        message: String,
    },

    /// A filter value is outside the supported month/day names.
    #[error("invalid {field} filter value '{value}'")]
    Validation { field: &'static str, value: String },

    /// The city source configuration file could not be read.
    #[error("invalid source config '{path}': {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, BikeshareError>;

impl BikeshareError {
    pub fn parse<P: Into<PathBuf>, S: Into<String>>(path: P, row: u64, message: S) -> Self {
        BikeshareError::Parse {
            path: path.into(),
            row,
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(field: &'static str, value: S) -> Self {
        BikeshareError::Validation {
            field,
            value: value.into(),
        }
    }
}
