//! Dataset loading for the presentation layer.
//!
//! A [`Session`] owns the configuration and the dataset cache. Every call to
//! [`Session::dataset`] re-reads the input files and looks the content up in
//! the cache, so unchanged inputs are never rebuilt and edited inputs are
//! picked up on the next call.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};
use wdi_model::TidyDataset;
use wdi_transform::{CacheStats, DatasetCache};

use crate::config::AppConfig;

pub struct Session {
    config: AppConfig,
    cache: DatasetCache,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load inputs and return the (possibly cached) tidy dataset.
    pub fn dataset(&self) -> Result<Arc<TidyDataset>> {
        let span = info_span!("load", data_dir = %self.config.data.dir.display());
        let _guard = span.enter();
        let start = Instant::now();

        let read_options = self.config.read_options()?;
        let tables = self
            .config
            .source_files()
            .load(&read_options)
            .context("load indicator tables")?;
        let dataset = self
            .cache
            .get_or_build(&tables, &self.config.tidy)
            .context("build tidy dataset")?;

        info!(
            rows = dataset.len(),
            duration_ms = start.elapsed().as_millis(),
            "dataset ready"
        );
        Ok(dataset)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
