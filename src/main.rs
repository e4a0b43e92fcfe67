//! CLI entry point for the bike-share statistics tool.
//!
//! Provides subcommands for computing a statistics report for one city,
//! paging through the raw trips behind a selection, and listing the
//! supported cities.

use anyhow::Result;
use bikeshare_stats::config::{City, SourceConfig};
use bikeshare_stats::filter::filter;
use bikeshare_stats::loader::load;
use bikeshare_stats::output::{print_pretty, render_text, to_json, write_raw_rows};
use bikeshare_stats::pipeline::{Selection, run};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Descriptive statistics over bike-share trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute time, station, duration and rider statistics
    Analyze {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print raw trips for a selection as CSV
    Raw {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Number of selected trips to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Number of trips to print
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },
    /// List the supported cities and their source files
    ListCities {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SelectionArgs {
    /// City to analyze: chicago, "new york city" or washington
    #[arg(value_name = "CITY")]
    city: String,

    /// Month(s) to keep, january through june (default: all)
    #[arg(short, long = "month", value_name = "MONTH", value_delimiter = ',')]
    months: Vec<String>,

    /// Day(s) of week to keep (default: all)
    #[arg(short, long = "day", value_name = "DAY", value_delimiter = ',')]
    days: Vec<String>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory holding the city CSV files [env: BIKESHARE_DATA_DIR]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to file names
    #[arg(long)]
    cities_file: Option<PathBuf>,
}

impl SourceArgs {
    fn config(&self) -> Result<SourceConfig> {
        let config = match &self.data_dir {
            Some(dir) => SourceConfig::new(dir),
            None => SourceConfig::from_env(),
        };
        Ok(match &self.cities_file {
            Some(path) => config.with_overrides_from(path)?,
            None => config,
        })
    }
}

impl SelectionArgs {
    fn selection(&self) -> Result<Selection> {
        Ok(Selection::parse(&self.city, &self.months, &self.days)?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { selection, format } => {
            let config = selection.source.config()?;
            let report = run(&config, &selection.selection()?)?;
            print_pretty(&report);

            match format {
                Format::Text => print!("{}", render_text(&report)),
                Format::Json => println!("{}", to_json(&report)?),
            }
        }
        Commands::Raw {
            selection,
            offset,
            limit,
        } => {
            let config = selection.source.config()?;
            let selection = selection.selection()?;
            let dataset = load(&config, selection.city)?;
            let view = filter(&dataset, &selection.months, &selection.days);

            let window = view.window(offset, limit);
            info!(
                offset,
                shown = window.len(),
                selected = view.len(),
                "Raw trip window"
            );
            let caps = dataset.capabilities;
            write_raw_rows(
                std::io::stdout().lock(),
                &window,
                caps.has_gender || caps.has_birth_year,
            )?;
        }
        Commands::ListCities { source } => {
            let config = source.config()?;
            for city in City::ALL {
                println!("{:<15} {}", city.name(), config.path_for(city).display());
            }
        }
    }

    Ok(())
}
