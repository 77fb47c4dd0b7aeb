//! The indicators carried by every tidy record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A measured indicator sourced from one wide-format input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Total population.
    Population,
    /// Life expectancy at birth, in years.
    LifeExpectancy,
    /// Gross national income per capita.
    GniPerCapita,
}

impl Indicator {
    /// All indicators in merge order.
    pub const ALL: [Indicator; 3] = [
        Indicator::Population,
        Indicator::LifeExpectancy,
        Indicator::GniPerCapita,
    ];

    /// Canonical column name in the tidy dataset.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::LifeExpectancy => "life_expectancy",
            Self::GniPerCapita => "gni_per_capita",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Population => "Population",
            Self::LifeExpectancy => "Life expectancy",
            Self::GniPerCapita => "GNI per capita",
        }
    }

    /// Default source file name inside a data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Population => "population.csv",
            Self::LifeExpectancy => "life_expectancy.csv",
            Self::GniPerCapita => "gni_per_capita.csv",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
