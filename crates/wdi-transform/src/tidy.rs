//! Per-table reshaping: wide rows to sorted, forward-filled long rows.

use std::collections::BTreeSet;

use tracing::debug;
use wdi_ingest::RawTable;
use wdi_model::Indicator;

use crate::error::SchemaError;
use crate::options::TidyOptions;

/// One `(country, year, value)` observation of a single indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub country: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl LongRow {
    pub fn new(country: impl Into<String>, year: i32, value: Option<f64>) -> Self {
        Self {
            country: country.into(),
            year,
            value,
        }
    }
}

/// A single indicator in long format, sorted by `(country, year)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator: Indicator,
    pub rows: Vec<LongRow>,
}

/// Find the country column: the first candidate present in the headers.
pub fn identify_country_column(
    table: &RawTable,
    candidates: &[String],
) -> Result<usize, SchemaError> {
    candidates
        .iter()
        .find_map(|name| table.column_index(name))
        .ok_or_else(|| SchemaError::MissingCountryColumn {
            table: table.name.clone(),
            candidates: candidates.to_vec(),
            found: table.headers.clone(),
        })
}

/// Parse a year header. Integral float spellings such as `2000.0` are
/// accepted.
pub(crate) fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let value = trimmed.parse::<f64>().ok()?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// Parse a cell. Blank, non-numeric, and NaN cells are missing.
pub(crate) fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Replace missing values with the latest earlier value of the same country.
///
/// `rows` must be sorted by `(country, year)`. A missing value at the start
/// of a country's run stays missing.
pub fn forward_fill(rows: &mut [LongRow]) {
    for run in rows.chunk_by_mut(|a, b| a.country == b.country) {
        let mut last = None;
        for row in run {
            match row.value {
                Some(value) => last = Some(value),
                None => row.value = last,
            }
        }
    }
}

/// Reshape one raw table into a sorted, forward-filled long series.
///
/// Metadata columns are dropped, every other column is treated as a year.
/// Columns whose header is not a year and rows with a blank country produce
/// no output rows.
pub fn tidy_indicator(
    table: &RawTable,
    indicator: Indicator,
    options: &TidyOptions,
) -> Result<IndicatorSeries, SchemaError> {
    let country_idx = identify_country_column(table, &options.country_columns)?;
    let metadata: BTreeSet<&str> = options.metadata_columns.iter().map(String::as_str).collect();

    let mut skipped_headers = Vec::new();
    let year_columns: Vec<(usize, i32)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(idx, header)| *idx != country_idx && !metadata.contains(header.as_str()))
        .filter_map(|(idx, header)| match parse_year(header) {
            Some(year) => Some((idx, year)),
            None => {
                skipped_headers.push(header.as_str());
                None
            }
        })
        .collect();
    if !skipped_headers.is_empty() {
        debug!(
            table = %table.name,
            columns = ?skipped_headers,
            "ignoring non-year columns"
        );
    }

    let mut rows = Vec::with_capacity(table.height() * year_columns.len());
    let mut blank_countries = 0usize;
    for record in &table.rows {
        let country = record.get(country_idx).map_or("", String::as_str);
        if country.is_empty() {
            blank_countries += 1;
            continue;
        }
        for &(idx, year) in &year_columns {
            let cell = record.get(idx).map_or("", String::as_str);
            rows.push(LongRow::new(country, year, parse_value(cell)));
        }
    }
    if blank_countries > 0 {
        debug!(table = %table.name, rows = blank_countries, "skipping rows without a country");
    }

    rows.sort_by(|a, b| (a.country.as_str(), a.year).cmp(&(b.country.as_str(), b.year)));
    let observed = rows.iter().filter(|r| r.value.is_some()).count();
    forward_fill(&mut rows);
    let filled = rows.iter().filter(|r| r.value.is_some()).count() - observed;

    debug!(
        table = %table.name,
        indicator = %indicator,
        country_column = %table.headers[country_idx],
        year_columns = year_columns.len(),
        rows = rows.len(),
        observed,
        filled,
        "tidied indicator table"
    );
    Ok(IndicatorSeries { indicator, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            "test",
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    fn values(series: &IndicatorSeries) -> Vec<Option<f64>> {
        series.rows.iter().map(|r| r.value).collect()
    }

    #[test]
    fn forward_fill_carries_last_observation() {
        let mut rows: Vec<LongRow> = [None, None, Some(5.0), None, Some(7.0)]
            .into_iter()
            .zip(1..)
            .map(|(value, year)| LongRow::new("X", year, value))
            .collect();
        forward_fill(&mut rows);
        let filled: Vec<_> = rows.iter().map(|r| r.value).collect();
        assert_eq!(filled, vec![None, None, Some(5.0), Some(5.0), Some(7.0)]);
    }

    #[test]
    fn forward_fill_does_not_leak_across_countries() {
        let mut rows = vec![
            LongRow::new("A", 2000, Some(1.0)),
            LongRow::new("A", 2001, None),
            LongRow::new("B", 2000, None),
            LongRow::new("B", 2001, Some(2.0)),
        ];
        forward_fill(&mut rows);
        let filled: Vec<_> = rows.iter().map(|r| r.value).collect();
        assert_eq!(filled, vec![Some(1.0), Some(1.0), None, Some(2.0)]);
    }

    #[test]
    fn year_and_value_parsing_is_tolerant() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year(" 2000.0 "), Some(2000));
        assert_eq!(parse_year("2000.5"), None);
        assert_eq!(parse_year("Country Code"), None);
        assert_eq!(parse_year(""), None);

        assert_eq!(parse_value("12.5"), Some(12.5));
        assert_eq!(parse_value(" 3 "), Some(3.0));
        assert_eq!(parse_value("1e3"), Some(1000.0));
        assert_eq!(parse_value(".."), None);
        assert_eq!(parse_value("12a"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value(""), None);
    }

    #[test]
    fn prefers_first_country_candidate() {
        let t = table(&["Country Name", "country", "2000"], &[&["A", "B", "1"]]);
        let options = TidyOptions::default();
        assert_eq!(identify_country_column(&t, &options.country_columns), Ok(1));
    }

    #[test]
    fn missing_country_column_is_schema_error() {
        let t = table(&["nation", "2000"], &[&["A", "1"]]);
        let err = tidy_indicator(&t, Indicator::Population, &TidyOptions::default()).unwrap_err();
        let SchemaError::MissingCountryColumn { table, found, .. } = err;
        assert_eq!(table, "test");
        assert_eq!(found, vec!["nation", "2000"]);
    }

    #[test]
    fn pivots_every_year_column_and_sorts() {
        let t = table(
            &["country", "2001", "2000"],
            &[&["Zambia", "2", "1"], &["Angola", "", "3"]],
        );
        let series = tidy_indicator(&t, Indicator::Population, &TidyOptions::default()).unwrap();
        let keys: Vec<_> = series
            .rows
            .iter()
            .map(|r| (r.country.as_str(), r.year))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Angola", 2000),
                ("Angola", 2001),
                ("Zambia", 2000),
                ("Zambia", 2001)
            ]
        );
        assert_eq!(values(&series), vec![Some(3.0), Some(3.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn metadata_columns_do_not_change_output() {
        let with_meta = table(
            &["Country Name", "Indicator Name", "Indicator Code", "2000", "2001"],
            &[&["X", "Life expectancy", "SP.DYN.LE00.IN", "70", "n/a"]],
        );
        let without_meta = table(&["Country Name", "2000", "2001"], &[&["X", "70", "n/a"]]);
        let options = TidyOptions::default();
        let a = tidy_indicator(&with_meta, Indicator::LifeExpectancy, &options).unwrap();
        let b = tidy_indicator(&without_meta, Indicator::LifeExpectancy, &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(values(&a), vec![Some(70.0), Some(70.0)]);
    }

    #[test]
    fn non_year_columns_and_blank_countries_are_skipped() {
        let t = table(
            &["Country Name", "Country Code", "2000", ""],
            &[&["X", "XXX", "1", ""], &["", "", "9", ""]],
        );
        let series = tidy_indicator(&t, Indicator::GniPerCapita, &TidyOptions::default()).unwrap();
        assert_eq!(series.rows, vec![LongRow::new("X", 2000, Some(1.0))]);
    }
}
