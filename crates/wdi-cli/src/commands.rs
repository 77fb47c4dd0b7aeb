use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, warn};

use wdi_cli::pipeline::Session;
use wdi_cli::ticker::{TickOutcome, YearTicker};
use wdi_model::{ChartBounds, TidyDataset};
use wdi_transform::write_csv;

use crate::cli::{CountriesArgs, CountryFilter, ExportArgs, ExportFormatArg, PlayArgs, ViewArgs};
use crate::summary::{print_bounds, print_frame, print_summary};

pub fn run_summary(session: &Session) -> Result<()> {
    let dataset = session.dataset()?;
    print_summary(&dataset, session.config().tidy.drop_incomplete);
    Ok(())
}

pub fn run_years(session: &Session) -> Result<()> {
    let dataset = session.dataset()?;
    for year in dataset.years() {
        println!("{year}");
    }
    Ok(())
}

pub fn run_countries(session: &Session, args: &CountriesArgs) -> Result<()> {
    let dataset = session.dataset()?;
    let countries = match args.year {
        Some(year) => {
            resolve_year(&dataset, Some(year))?;
            dataset.countries_in_year(year)
        }
        None => dataset.countries(),
    };
    for country in countries {
        println!("{country}");
    }
    Ok(())
}

pub fn run_view(session: &Session, args: &ViewArgs) -> Result<()> {
    let dataset = session.dataset()?;
    let year = resolve_year(&dataset, args.year)?;
    warn_unknown_countries(&dataset, &args.filter);
    let view = dataset.view(Some(year), &args.filter.countries);
    print_frame(&view, args.filter.limit);
    print_bounds(ChartBounds::for_dataset(&dataset).as_ref());
    Ok(())
}

pub fn run_play(session: &Session, args: &PlayArgs) -> Result<()> {
    let dataset = session.dataset()?;
    warn_unknown_countries(&dataset, &args.filter);
    let interval_ms = args
        .interval_ms
        .unwrap_or(session.config().play.interval_ms);
    let ticker = YearTicker::new(dataset.years(), Duration::from_millis(interval_ms))
        .within(args.from, args.to);
    if ticker.years().is_empty() {
        bail!("no years to play in the selected range");
    }
    print_bounds(ChartBounds::for_dataset(&dataset).as_ref());

    let mut failure = None;
    let outcome = ticker.run(|year| match session.dataset() {
        Ok(current) => {
            println!();
            print_frame(&current.view(Some(year), &args.filter.countries), args.filter.limit);
            ControlFlow::Continue(())
        }
        Err(error) => {
            failure = Some(error);
            ControlFlow::Break(())
        }
    });
    if let Some(error) = failure {
        return Err(error);
    }

    let stats = session.cache_stats();
    match outcome {
        TickOutcome::Completed { ticks } => {
            info!(frames = ticks, cache_hits = stats.hits, "playback complete");
        }
        TickOutcome::Stopped { ticks, last_year } => {
            info!(frames = ticks, last_year = ?last_year, "playback stopped");
        }
    }
    Ok(())
}

pub fn run_export(session: &Session, args: &ExportArgs) -> Result<()> {
    let dataset = session.dataset()?;
    let file = File::create(&args.output)
        .with_context(|| format!("create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    match args.format {
        ExportFormatArg::Csv => {
            write_csv(&dataset, &mut writer).context("write csv")?;
        }
        ExportFormatArg::Json => {
            serde_json::to_writer_pretty(&mut writer, dataset.records()).context("write json")?;
        }
    }
    writer.flush().context("flush output")?;
    println!(
        "Wrote {} rows to {}",
        dataset.len(),
        args.output.display()
    );
    Ok(())
}

/// Use `requested` if it lies within the available years, else fall back to
/// the latest year when nothing was requested.
fn resolve_year(dataset: &TidyDataset, requested: Option<i32>) -> Result<i32> {
    let (min, max) = dataset
        .year_range()
        .ok_or_else(|| anyhow!("dataset has no rows"))?;
    match requested {
        None => Ok(max),
        Some(year) if (min..=max).contains(&year) => Ok(year),
        Some(year) => bail!("year {year} is outside the available range {min}-{max}"),
    }
}

fn warn_unknown_countries(dataset: &TidyDataset, filter: &CountryFilter) {
    if filter.countries.is_empty() {
        return;
    }
    let known = dataset.countries();
    for country in &filter.countries {
        if known.binary_search(country).is_err() {
            warn!(country = %country, "country not present in dataset");
        }
    }
}
