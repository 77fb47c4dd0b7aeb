//! Configuration file handling.
//!
//! Configuration is read from `wdi.toml` in the working directory when
//! present, or from an explicit `--config` path. Every field has a default,
//! so an empty file is valid. Relative paths are resolved against the
//! working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wdi_ingest::{ReadOptions, SourceFiles};
use wdi_model::Indicator;
use wdi_transform::TidyOptions;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "wdi.toml";

/// Default delay between animation frames.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub tidy: TidyOptions,
    pub play: PlayConfig,
}

/// Where the indicator files live and how to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the default file names.
    pub dir: PathBuf,
    /// Single ASCII field delimiter.
    pub delimiter: char,
    /// Preamble rows before the header row.
    pub skip_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_expectancy: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gni_per_capita: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            delimiter: ',',
            skip_rows: 0,
            population: None,
            life_expectancy: None,
            gni_per_capita: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub interval_ms: u64,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    /// Parse a configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parse config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else `wdi.toml` in `cwd` if
    /// present, else defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load_from(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolved input paths, applying per-indicator overrides.
    pub fn source_files(&self) -> SourceFiles {
        let mut sources = SourceFiles::in_dir(&self.data.dir);
        for indicator in Indicator::ALL {
            if let Some(path) = self.data.path_override(indicator) {
                sources = sources.with_path(indicator, path.to_path_buf());
            }
        }
        sources
    }

    pub fn read_options(&self) -> Result<ReadOptions> {
        let delimiter = self.data.delimiter;
        if !delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got '{delimiter}'");
        }
        Ok(ReadOptions {
            delimiter: delimiter as u8,
            skip_rows: self.data.skip_rows,
        })
    }
}

impl DataConfig {
    fn path_override(&self, indicator: Indicator) -> Option<&Path> {
        match indicator {
            Indicator::Population => self.population.as_deref(),
            Indicator::LifeExpectancy => self.life_expectancy.as_deref(),
            Indicator::GniPerCapita => self.gni_per_capita.as_deref(),
        }
    }
}
