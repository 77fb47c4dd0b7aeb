//! World-indicator explorer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use wdi_cli::config::AppConfig;
use wdi_cli::logging::{LogConfig, LogFormat, init_logging};
use wdi_cli::pipeline::Session;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_countries, run_export, run_play, run_summary, run_view, run_years};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let session = match load_config(&cli) {
        Ok(config) => Session::new(config),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let result = match &cli.command {
        Command::Summary => run_summary(&session),
        Command::Years => run_years(&session),
        Command::Countries(args) => run_countries(&session, args),
        Command::View(args) => run_view(&session, args),
        Command::Play(args) => run_play(&session, args),
        Command::Export(args) => run_export(&session, args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Config file first, then CLI overrides.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let cwd = std::env::current_dir()?;
    let mut config = AppConfig::discover(cli.config.as_deref(), &cwd)?;
    if let Some(dir) = &cli.data_dir {
        config.data.dir = dir.clone();
    }
    if cli.keep_incomplete {
        config.tidy.drop_incomplete = false;
    }
    Ok(config)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
