//! Joining indicator series into the tidy dataset.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{info, warn};
use wdi_ingest::{RawTable, RawTables};
use wdi_model::{Indicator, TidyDataset, TidyRecord};

use crate::error::SchemaError;
use crate::options::TidyOptions;
use crate::tidy::{IndicatorSeries, tidy_indicator};

/// Bit set of the indicators that supplied a row for a key.
type Sources = u8;

const ALL_SOURCES: Sources = 0b111;

fn source_bit(indicator: Indicator) -> Sources {
    match indicator {
        Indicator::Population => 0b001,
        Indicator::LifeExpectancy => 0b010,
        Indicator::GniPerCapita => 0b100,
    }
}

/// Join series on `(country, year)`.
///
/// With `drop_incomplete` only keys present in all three series survive, and
/// rows with any indicator still missing are removed. Otherwise every key
/// from any series is kept and absent indicators stay null.
///
/// A key repeated within one series keeps its first row.
pub fn merge_indicators(series: &[IndicatorSeries], drop_incomplete: bool) -> TidyDataset {
    let mut merged: BTreeMap<(String, i32), (TidyRecord, Sources)> = BTreeMap::new();
    let mut duplicates = 0usize;
    let expected = series
        .iter()
        .fold(0, |bits, s| bits | source_bit(s.indicator));

    for s in series {
        let bit = source_bit(s.indicator);
        for row in &s.rows {
            let (record, sources) = match merged.entry((row.country.clone(), row.year)) {
                Entry::Vacant(entry) => entry.insert((TidyRecord::new(&row.country, row.year), 0)),
                Entry::Occupied(entry) => entry.into_mut(),
            };
            if *sources & bit != 0 {
                duplicates += 1;
                continue;
            }
            *sources |= bit;
            record.set_value(s.indicator, row.value);
        }
    }
    if duplicates > 0 {
        warn!(duplicates, "duplicate (country, year) rows in input; kept first");
    }

    let keys = merged.len();
    let mut unmatched = 0usize;
    let mut incomplete = 0usize;
    let records: BTreeMap<(String, i32), TidyRecord> = merged
        .into_iter()
        .filter(|(_, (record, sources))| {
            if !drop_incomplete {
                return true;
            }
            if *sources != expected {
                unmatched += 1;
                false
            } else if !record.is_complete() {
                incomplete += 1;
                false
            } else {
                true
            }
        })
        .map(|(key, (record, _))| (key, record))
        .collect();

    info!(
        keys,
        rows = records.len(),
        unmatched,
        incomplete,
        drop_incomplete,
        "merged indicator series"
    );
    TidyDataset::from_keyed(records)
}

/// Build the tidy dataset from the population, life expectancy, and GNI
/// tables.
///
/// # Errors
///
/// Returns [`SchemaError`] if any table has no recognizable country column.
pub fn build_tidy_dataset(
    population: &RawTable,
    life_expectancy: &RawTable,
    gni_per_capita: &RawTable,
    options: &TidyOptions,
) -> Result<TidyDataset, SchemaError> {
    let series = [
        tidy_indicator(population, Indicator::Population, options)?,
        tidy_indicator(life_expectancy, Indicator::LifeExpectancy, options)?,
        tidy_indicator(gni_per_capita, Indicator::GniPerCapita, options)?,
    ];
    debug_assert_eq!(
        series.iter().fold(0, |bits, s| bits | source_bit(s.indicator)),
        ALL_SOURCES
    );
    Ok(merge_indicators(&series, options.drop_incomplete))
}

/// [`build_tidy_dataset`] over a loaded [`RawTables`] set.
pub fn build_from_tables(
    tables: &RawTables,
    options: &TidyOptions,
) -> Result<TidyDataset, SchemaError> {
    build_tidy_dataset(
        &tables.population,
        &tables.life_expectancy,
        &tables.gni_per_capita,
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tidy::LongRow;

    fn series(indicator: Indicator, rows: &[(&str, i32, Option<f64>)]) -> IndicatorSeries {
        IndicatorSeries {
            indicator,
            rows: rows
                .iter()
                .map(|(c, y, v)| LongRow::new(*c, *y, *v))
                .collect(),
        }
    }

    #[test]
    fn duplicate_keys_keep_first_row() {
        let pop = series(
            Indicator::Population,
            &[("X", 2000, Some(1.0)), ("X", 2000, Some(2.0))],
        );
        let dataset = merge_indicators(&[pop], false);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].population, Some(1.0));
    }

    #[test]
    fn inner_join_requires_every_series() {
        let pop = series(Indicator::Population, &[("X", 1, Some(1.0)), ("X", 2, Some(1.0))]);
        let life = series(Indicator::LifeExpectancy, &[("X", 2, Some(60.0))]);
        let gni = series(Indicator::GniPerCapita, &[("X", 2, Some(9.0)), ("Y", 2, Some(9.0))]);
        let dataset = merge_indicators(&[pop, life, gni], true);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].key(), ("X", 2));
    }

    #[test]
    fn inner_join_drops_rows_still_missing_after_fill() {
        let pop = series(Indicator::Population, &[("X", 1, Some(1.0))]);
        let life = series(Indicator::LifeExpectancy, &[("X", 1, None)]);
        let gni = series(Indicator::GniPerCapita, &[("X", 1, Some(9.0))]);
        assert!(merge_indicators(&[pop.clone(), life.clone(), gni.clone()], true).is_empty());

        let kept = merge_indicators(&[pop, life, gni], false);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.records()[0].life_expectancy, None);
    }
}
