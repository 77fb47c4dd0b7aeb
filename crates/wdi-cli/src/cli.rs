//! CLI argument definitions for the world-indicator explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wdi",
    version,
    about = "Explore population, life expectancy, and income by country and year",
    long_about = "Load wide-format population, life expectancy, and GNI per capita tables,\n\
                  reshape them into one tidy (country, year) dataset, and query it the way\n\
                  the bubble-chart dashboard does."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./wdi.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing population.csv, life_expectancy.csv, gni_per_capita.csv.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep (country, year) rows missing from some table or still incomplete.
    #[arg(long = "keep-incomplete", global = true)]
    pub keep_incomplete: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the dataset and print row, country, and coverage counts.
    Summary,

    /// List the years present in the dataset.
    Years,

    /// List countries, optionally only those with data in one year.
    Countries(CountriesArgs),

    /// Show the chart data for one year.
    View(ViewArgs),

    /// Step through the years with a fixed delay, printing each frame.
    Play(PlayArgs),

    /// Write the tidy dataset to a file.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct CountriesArgs {
    /// Only countries with a row in this year.
    #[arg(long = "year")]
    pub year: Option<i32>,
}

#[derive(Args)]
pub struct CountryFilter {
    /// Restrict to these countries (repeatable; default: all).
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Maximum rows printed per frame (0 for no limit).
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Year to show (default: latest available).
    #[arg(long = "year")]
    pub year: Option<i32>,

    #[command(flatten)]
    pub filter: CountryFilter,
}

#[derive(Args)]
pub struct PlayArgs {
    /// First year (default: earliest available).
    #[arg(long = "from")]
    pub from: Option<i32>,

    /// Last year (default: latest available).
    #[arg(long = "to")]
    pub to: Option<i32>,

    /// Delay between frames in milliseconds (default: from config).
    #[arg(long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    #[command(flatten)]
    pub filter: CountryFilter,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: ExportFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
