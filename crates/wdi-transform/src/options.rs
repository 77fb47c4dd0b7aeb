//! Builder configuration.

use serde::{Deserialize, Serialize};

/// Accepted country column names, tried in order.
pub const DEFAULT_COUNTRY_COLUMNS: [&str; 2] = ["country", "Country Name"];

/// Descriptive columns removed before the pivot when present.
pub const DEFAULT_METADATA_COLUMNS: [&str; 2] = ["Indicator Name", "Indicator Code"];

/// Options controlling how raw tables become a tidy dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TidyOptions {
    /// Keep only `(country, year)` pairs present in every table, then drop
    /// rows where any indicator is still missing after forward-fill.
    ///
    /// When false the merge keeps the union of keys and leaves absent
    /// indicators null.
    pub drop_incomplete: bool,

    /// Country column schema variants. First match wins.
    pub country_columns: Vec<String>,

    /// Non-year columns to discard.
    pub metadata_columns: Vec<String>,
}

impl Default for TidyOptions {
    fn default() -> Self {
        Self {
            drop_incomplete: true,
            country_columns: DEFAULT_COUNTRY_COLUMNS.map(String::from).to_vec(),
            metadata_columns: DEFAULT_METADATA_COLUMNS.map(String::from).to_vec(),
        }
    }
}

impl TidyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_drop_incomplete(mut self, enable: bool) -> Self {
        self.drop_incomplete = enable;
        self
    }

    #[must_use]
    pub fn with_country_columns(mut self, columns: Vec<String>) -> Self {
        self.country_columns = columns;
        self
    }

    #[must_use]
    pub fn with_metadata_columns(mut self, columns: Vec<String>) -> Self {
        self.metadata_columns = columns;
        self
    }

    /// Fields that affect the built dataset, for cache keys.
    pub(crate) fn cache_fields(&self) -> Vec<String> {
        let mut fields = vec![format!("drop_incomplete={}", self.drop_incomplete)];
        fields.extend(self.country_columns.iter().map(|c| format!("country:{c}")));
        fields.extend(self.metadata_columns.iter().map(|c| format!("metadata:{c}")));
        fields
    }
}
