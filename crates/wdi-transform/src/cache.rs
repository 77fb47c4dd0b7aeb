//! Memoization of built datasets.
//!
//! The cache is keyed by the content of the three input tables plus the
//! builder options. A dataset is built at most once per key; afterwards every
//! caller receives the same shared, immutable [`TidyDataset`].

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use wdi_ingest::{Fingerprint, RawTable, RawTables};
use wdi_model::TidyDataset;

use crate::error::SchemaError;
use crate::merge::build_from_tables;
use crate::options::TidyOptions;

/// Identifies one set of builder inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(Fingerprint);

impl CacheKey {
    pub fn for_inputs(
        population: &RawTable,
        life_expectancy: &RawTable,
        gni_per_capita: &RawTable,
        options: &TidyOptions,
    ) -> Self {
        let parts = [
            population.fingerprint(),
            life_expectancy.fingerprint(),
            gni_per_capita.fingerprint(),
        ];
        let fields = options.cache_fields();
        Self(Fingerprint::combine(
            &parts,
            fields.iter().map(String::as_str),
        ))
    }

    pub fn for_tables(tables: &RawTables, options: &TidyOptions) -> Self {
        Self::for_inputs(
            &tables.population,
            &tables.life_expectancy,
            &tables.gni_per_capita,
            options,
        )
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.short())
    }
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Thread-safe dataset cache.
///
/// Lookups share a read lock. On a miss the builder runs while the write
/// lock is held, so concurrent callers for the same key wait for the single
/// build instead of repeating it.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<CacheKey, Arc<TidyDataset>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `key`, or run `build` and cache its
    /// result. A failed build caches nothing.
    pub fn get_or_compute<F, E>(&self, key: CacheKey, build: F) -> Result<Arc<TidyDataset>, E>
    where
        F: FnOnce() -> Result<TidyDataset, E>,
    {
        if let Some(dataset) = self.read().get(&key) {
            self.record_hit(key);
            return Ok(Arc::clone(dataset));
        }

        let mut entries = self.write();
        if let Some(dataset) = entries.get(&key) {
            self.record_hit(key);
            return Ok(Arc::clone(dataset));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "dataset cache miss");
        let dataset = Arc::new(build()?);
        entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Build (or fetch) the dataset for a loaded table set.
    pub fn get_or_build(
        &self,
        tables: &RawTables,
        options: &TidyOptions,
    ) -> Result<Arc<TidyDataset>, SchemaError> {
        let key = CacheKey::for_tables(tables, options);
        self.get_or_compute(key, || build_from_tables(tables, options))
    }

    /// Cached dataset for `key`, without building.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<TidyDataset>> {
        self.read().get(key).cloned()
    }

    /// Remove one entry. Returns true if it was present.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.write().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn record_hit(&self, key: CacheKey) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "dataset cache hit");
    }

    // A panic inside a builder leaves the map itself consistent, so poisoned
    // locks are entered anyway.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, Arc<TidyDataset>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, Arc<TidyDataset>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::convert::Infallible;

    use super::*;
    use wdi_model::TidyRecord;

    fn key(name: &str) -> CacheKey {
        CacheKey(Fingerprint::of_fields([name]))
    }

    fn dataset(country: &str) -> TidyDataset {
        TidyDataset::from_records(vec![TidyRecord::new(country, 2000)]).unwrap()
    }

    #[test]
    fn builds_once_per_key() {
        let cache = DatasetCache::new();
        let calls = Cell::new(0);
        let build = || {
            calls.set(calls.get() + 1);
            Ok::<_, Infallible>(dataset("X"))
        };

        let first = cache.get_or_compute(key("a"), build).unwrap();
        let second = cache.get_or_compute(key("a"), build).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });

        cache.get_or_compute(key("b"), build).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_build_is_not_cached() {
        let cache = DatasetCache::new();
        let result = cache.get_or_compute(key("a"), || Err::<TidyDataset, _>("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(cache.is_empty());

        let ok = cache.get_or_compute(key("a"), || Ok::<_, &str>(dataset("Y")));
        assert_eq!(ok.unwrap().records()[0].country, "Y");
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let cache = DatasetCache::new();
        cache
            .get_or_compute(key("a"), || Ok::<_, Infallible>(dataset("X")))
            .unwrap();
        assert!(cache.get(&key("a")).is_some());
        assert!(cache.invalidate(&key("a")));
        assert!(!cache.invalidate(&key("a")));
        assert!(cache.get(&key("a")).is_none());

        cache
            .get_or_compute(key("a"), || Ok::<_, Infallible>(dataset("Z")))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
