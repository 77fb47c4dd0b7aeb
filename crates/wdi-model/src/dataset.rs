//! The tidy dataset and its read-only projections.
//!
//! A [`TidyDataset`] is built once and shared immutably. Every query returns
//! owned projections or a borrowed [`DatasetView`]; nothing here mutates the
//! underlying records.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::indicator::Indicator;
use crate::record::TidyRecord;

/// Records ordered by `(country, year)`, unique on that pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TidyDataset {
    records: Vec<TidyRecord>,
}

impl TidyDataset {
    /// Build a dataset from arbitrary records, sorting them by key.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateKey`] if two records share a
    /// `(country, year)` pair.
    pub fn from_records(mut records: Vec<TidyRecord>) -> Result<Self> {
        records.sort_by(|a, b| a.key().cmp(&b.key()));
        if let Some(pair) = records.windows(2).find(|pair| pair[0].key() == pair[1].key()) {
            return Err(ModelError::DuplicateKey {
                country: pair[1].country.clone(),
                year: pair[1].year,
            });
        }
        Ok(Self { records })
    }

    /// Build a dataset from records keyed by `(country, year)`. The map's
    /// ordering and uniqueness carry over directly.
    pub fn from_keyed(records: BTreeMap<(String, i32), TidyRecord>) -> Self {
        Self {
            records: records.into_values().collect(),
        }
    }

    /// Records in `(country, year)` order.
    pub fn records(&self) -> &[TidyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a single observation.
    pub fn get(&self, country: &str, year: i32) -> Option<&TidyRecord> {
        self.records
            .binary_search_by(|record| record.key().cmp(&(country, year)))
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Sorted distinct years.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().collect()
    }

    /// Smallest and largest year present.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Sorted distinct countries.
    pub fn countries(&self) -> Vec<String> {
        // Records are already grouped by country in sorted order.
        let mut countries: Vec<String> = Vec::new();
        for record in &self.records {
            if countries.last() != Some(&record.country) {
                countries.push(record.country.clone());
            }
        }
        countries
    }

    /// Sorted distinct countries that have a row in `year`.
    pub fn countries_in_year(&self, year: i32) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.country.clone())
            .collect()
    }

    /// Largest non-missing value of an indicator.
    pub fn max_value(&self, indicator: Indicator) -> Option<f64> {
        self.values(indicator).reduce(f64::max)
    }

    /// Smallest non-missing value of an indicator.
    pub fn min_value(&self, indicator: Indicator) -> Option<f64> {
        self.values(indicator).reduce(f64::min)
    }

    /// Number of rows where an indicator is missing.
    pub fn missing_count(&self, indicator: Indicator) -> usize {
        self.records
            .iter()
            .filter(|r| r.value(indicator).is_none())
            .count()
    }

    fn values(&self, indicator: Indicator) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(move |r| r.value(indicator))
    }

    /// Rows for `year` (or every year when `None`) whose country is in
    /// `countries` (or every country when the filter is empty).
    pub fn view<'a>(&'a self, year: Option<i32>, countries: &[String]) -> DatasetView<'a> {
        let filter: BTreeSet<&str> = countries.iter().map(String::as_str).collect();
        let rows = self
            .records
            .iter()
            .filter(|r| year.is_none_or(|y| r.year == y))
            .filter(|r| filter.is_empty() || filter.contains(r.country.as_str()))
            .collect();
        DatasetView { year, rows }
    }
}

/// A filtered, borrowed projection of a [`TidyDataset`].
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    year: Option<i32>,
    rows: Vec<&'a TidyRecord>,
}

impl<'a> DatasetView<'a> {
    /// The year this view was restricted to, if any.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn rows(&self) -> &[&'a TidyRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that can be plotted: income, life expectancy and population all
    /// present, and income strictly positive for the log axis.
    pub fn plottable(&self) -> impl Iterator<Item = &'a TidyRecord> + '_ {
        self.rows.iter().copied().filter(|r| {
            r.population.is_some()
                && r.life_expectancy.is_some()
                && r.gni_per_capita.is_some_and(|gni| gni > 0.0)
        })
    }
}
