pub mod analyzers;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod record;

pub use error::{BikeshareError, Result};
