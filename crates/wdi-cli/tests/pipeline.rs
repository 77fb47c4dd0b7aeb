//! Integration tests for configuration and dataset loading.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use wdi_cli::config::{AppConfig, DEFAULT_CONFIG_FILE};
use wdi_cli::pipeline::Session;

fn write_data(dir: &Path) {
    fs::write(
        dir.join("population.csv"),
        "Country Name,Indicator Name,Indicator Code,2000,2001,2002\n\
         Atlantis,Population,SP.POP.TOTL,100,110,120\n\
         Lemuria,Population,SP.POP.TOTL,50,55,\n",
    )
    .expect("write population");
    fs::write(
        dir.join("life_expectancy.csv"),
        "country,2000,2001,2002\nAtlantis,70,71,72\nLemuria,60,..,62\n",
    )
    .expect("write life expectancy");
    fs::write(
        dir.join("gni_per_capita.csv"),
        "country,2000,2001\nAtlantis,1000,\nLemuria,300,310\n",
    )
    .expect("write gni");
}

fn session_for(dir: &Path, drop_incomplete: bool) -> Session {
    let mut config = AppConfig::default();
    config.data.dir = dir.to_path_buf();
    config.tidy.drop_incomplete = drop_incomplete;
    Session::new(config)
}

#[test]
fn session_builds_merged_dataset() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path());

    let dataset = session_for(dir.path(), true).dataset().expect("dataset");
    assert_eq!(dataset.countries(), vec!["Atlantis", "Lemuria"]);
    assert_eq!(dataset.years(), vec![2000, 2001]);

    let atlantis = dataset.get("Atlantis", 2001).expect("row");
    assert_eq!(atlantis.gni_per_capita, Some(1000.0));
    let lemuria = dataset.get("Lemuria", 2001).expect("row");
    assert_eq!(lemuria.life_expectancy, Some(60.0));
}

#[test]
fn keep_incomplete_includes_years_missing_from_some_tables() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path());

    let dataset = session_for(dir.path(), false).dataset().expect("dataset");
    assert_eq!(dataset.years(), vec![2000, 2001, 2002]);
    let row = dataset.get("Lemuria", 2002).expect("row");
    assert_eq!(row.population, Some(55.0));
    assert_eq!(row.gni_per_capita, None);
    assert_eq!(dataset.countries_in_year(2002), vec!["Atlantis", "Lemuria"]);
}

#[test]
fn repeated_loads_hit_the_cache_until_inputs_change() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path());
    let session = session_for(dir.path(), true);

    let first = session.dataset().expect("first");
    let second = session.dataset().expect("second");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(session.cache_stats().hits, 1);

    fs::write(
        dir.path().join("gni_per_capita.csv"),
        "country,2000,2001\nAtlantis,1000,1200\nLemuria,300,310\n",
    )
    .expect("rewrite gni");
    let third = session.dataset().expect("third");
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(
        third.get("Atlantis", 2001).and_then(|r| r.gni_per_capita),
        Some(1200.0)
    );
    assert_eq!(session.cache_stats().misses, 2);
}

#[test]
fn missing_input_file_is_a_load_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = session_for(dir.path(), true).dataset().unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("load indicator tables"));
    assert!(message.contains("population.csv"));
}

#[test]
fn schema_error_surfaces_through_session() {
    let dir = TempDir::new().expect("temp dir");
    write_data(dir.path());
    fs::write(dir.path().join("gni_per_capita.csv"), "Nation,2000\nAtlantis,1\n")
        .expect("rewrite gni");
    let err = session_for(dir.path(), true).dataset().unwrap_err();
    assert!(format!("{err:#}").contains("gni_per_capita"));
}

#[test]
fn config_is_discovered_in_working_directory() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "[data]\ndir = \"inputs\"\n\n[play]\ninterval_ms = 40\n",
    )
    .expect("write config");

    let config = AppConfig::discover(None, dir.path()).expect("discover");
    assert_eq!(config.data.dir, Path::new("inputs"));
    assert_eq!(config.play.interval_ms, 40);

    let empty = TempDir::new().expect("temp dir");
    assert_eq!(
        AppConfig::discover(None, empty.path()).expect("defaults"),
        AppConfig::default()
    );
}

#[test]
fn explicit_config_must_exist_and_parse() {
    let dir = TempDir::new().expect("temp dir");
    assert!(AppConfig::discover(Some(&dir.path().join("nope.toml")), dir.path()).is_err());

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "[tidy]\ndrop_incomplete = \"sometimes\"\n").expect("write config");
    let err = AppConfig::discover(Some(&bad), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parse config"));
}
