use serde::{Deserialize, Serialize};

use crate::indicator::Indicator;

/// Canonical name of the country key column.
pub const COUNTRY_COLUMN: &str = "country";

/// Canonical name of the year key column.
pub const YEAR_COLUMN: &str = "year";

/// One `(country, year)` observation with every indicator.
///
/// Indicator fields are `None` when no value was observed (or carried
/// forward) for that country up to this year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRecord {
    pub country: String,
    pub year: i32,
    pub population: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub gni_per_capita: Option<f64>,
}

impl TidyRecord {
    /// Create a record with every indicator missing.
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
            population: None,
            life_expectancy: None,
            gni_per_capita: None,
        }
    }

    /// Value of a single indicator.
    #[must_use]
    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::Population => self.population,
            Indicator::LifeExpectancy => self.life_expectancy,
            Indicator::GniPerCapita => self.gni_per_capita,
        }
    }

    /// Set a single indicator.
    pub fn set_value(&mut self, indicator: Indicator, value: Option<f64>) {
        match indicator {
            Indicator::Population => self.population = value,
            Indicator::LifeExpectancy => self.life_expectancy = value,
            Indicator::GniPerCapita => self.gni_per_capita = value,
        }
    }

    /// True when every indicator has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Indicator::ALL.iter().all(|i| self.value(*i).is_some())
    }

    /// Merge key.
    #[must_use]
    pub fn key(&self) -> (&str, i32) {
        (self.country.as_str(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_all_indicators() {
        let mut record = TidyRecord::new("X", 2000);
        record.set_value(Indicator::Population, Some(100.0));
        record.set_value(Indicator::LifeExpectancy, Some(70.0));
        assert!(!record.is_complete());
        record.set_value(Indicator::GniPerCapita, Some(1000.0));
        assert!(record.is_complete());
        assert_eq!(record.value(Indicator::GniPerCapita), Some(1000.0));
    }
}
