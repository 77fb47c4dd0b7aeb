//! Locating and loading the three indicator files.

use std::path::{Path, PathBuf};

use tracing::info;
use wdi_model::Indicator;

use crate::error::Result;
use crate::table::{RawTable, ReadOptions, read_raw_table};

/// Paths to the population, life expectancy, and GNI files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub population: PathBuf,
    pub life_expectancy: PathBuf,
    pub gni_per_capita: PathBuf,
}

impl SourceFiles {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            population: dir.join(Indicator::Population.file_name()),
            life_expectancy: dir.join(Indicator::LifeExpectancy.file_name()),
            gni_per_capita: dir.join(Indicator::GniPerCapita.file_name()),
        }
    }

    pub fn path(&self, indicator: Indicator) -> &Path {
        match indicator {
            Indicator::Population => &self.population,
            Indicator::LifeExpectancy => &self.life_expectancy,
            Indicator::GniPerCapita => &self.gni_per_capita,
        }
    }

    /// Replace the path for one indicator.
    #[must_use]
    pub fn with_path(mut self, indicator: Indicator, path: PathBuf) -> Self {
        match indicator {
            Indicator::Population => self.population = path,
            Indicator::LifeExpectancy => self.life_expectancy = path,
            Indicator::GniPerCapita => self.gni_per_capita = path,
        }
        self
    }

    /// Read all three files. Any failure aborts the load.
    pub fn load(&self, options: &ReadOptions) -> Result<RawTables> {
        let population = read_raw_table(&self.population, options)?;
        let life_expectancy = read_raw_table(&self.life_expectancy, options)?;
        let gni_per_capita = read_raw_table(&self.gni_per_capita, options)?;
        info!(
            population_rows = population.height(),
            life_expectancy_rows = life_expectancy.height(),
            gni_rows = gni_per_capita.height(),
            "loaded indicator tables"
        );
        Ok(RawTables {
            population,
            life_expectancy,
            gni_per_capita,
        })
    }
}

/// The three raw indicator tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTables {
    pub population: RawTable,
    pub life_expectancy: RawTable,
    pub gni_per_capita: RawTable,
}

impl RawTables {
    pub fn get(&self, indicator: Indicator) -> &RawTable {
        match indicator {
            Indicator::Population => &self.population,
            Indicator::LifeExpectancy => &self.life_expectancy,
            Indicator::GniPerCapita => &self.gni_per_capita,
        }
    }
}
