//! Polars export of the tidy dataset.

use std::io::Write;

use polars::prelude::{
    Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};
use wdi_model::{COUNTRY_COLUMN, Indicator, TidyDataset, YEAR_COLUMN};

/// Convert the dataset to a `DataFrame` with columns `country`, `year`,
/// `population`, `life_expectancy`, `gni_per_capita`.
pub fn to_dataframe(dataset: &TidyDataset) -> PolarsResult<DataFrame> {
    let records = dataset.records();
    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();

    let mut columns: Vec<Column> = vec![
        Series::new(COUNTRY_COLUMN.into(), countries).into_column(),
        Series::new(YEAR_COLUMN.into(), years).into_column(),
    ];
    for indicator in Indicator::ALL {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.value(indicator)).collect();
        columns.push(Series::new(indicator.column_name().into(), values).into_column());
    }
    DataFrame::new(columns)
}

/// Write the dataset as CSV with a header row. Missing values are empty.
pub fn write_csv<W: Write>(dataset: &TidyDataset, writer: W) -> PolarsResult<()> {
    let mut df = to_dataframe(dataset)?;
    CsvWriter::new(writer).include_header(true).finish(&mut df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdi_model::TidyRecord;

    fn sample() -> TidyDataset {
        TidyDataset::from_records(vec![
            TidyRecord {
                country: "X".to_string(),
                year: 2000,
                population: Some(100.0),
                life_expectancy: Some(70.0),
                gni_per_capita: None,
            },
            TidyRecord::new("Y", 2001),
        ])
        .unwrap()
    }

    #[test]
    fn dataframe_has_canonical_columns() {
        let df = to_dataframe(&sample()).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "country",
                "year",
                "population",
                "life_expectancy",
                "gni_per_capita"
            ]
        );
        let gni = df.column("gni_per_capita").unwrap();
        assert_eq!(gni.null_count(), 2);
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("country,year,population,life_expectancy,gni_per_capita")
        );
        assert!(lines.next().is_some_and(|line| line.starts_with("X,2000,")));
        assert_eq!(text.lines().count(), 3);
    }
}
