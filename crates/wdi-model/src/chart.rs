//! Axis bounds for the income / life-expectancy bubble chart.

use serde::Serialize;

use crate::dataset::TidyDataset;
use crate::indicator::Indicator;

/// Lower bound of the log-scaled income axis.
pub const INCOME_AXIS_FLOOR: f64 = 1.0;

/// Multiplier applied to the largest income value for the upper bound.
pub const INCOME_AXIS_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Fixed chart axes, computed over the whole dataset so they do not move as
/// the selected year changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBounds {
    /// GNI per capita, log scale.
    pub income: AxisRange,
    /// Life expectancy, linear scale. `None` when no value is present.
    pub life_expectancy: Option<AxisRange>,
    /// Largest population, used to scale bubble sizes.
    pub max_population: Option<f64>,
}

impl ChartBounds {
    /// Returns `None` when the dataset carries no income values.
    pub fn for_dataset(dataset: &TidyDataset) -> Option<Self> {
        let max_income = dataset.max_value(Indicator::GniPerCapita)?;
        let upper = max_income.max(INCOME_AXIS_FLOOR) * INCOME_AXIS_HEADROOM;
        let life_expectancy = dataset
            .min_value(Indicator::LifeExpectancy)
            .zip(dataset.max_value(Indicator::LifeExpectancy))
            .map(|(min, max)| AxisRange { min, max });
        Some(Self {
            income: AxisRange {
                min: INCOME_AXIS_FLOOR,
                max: upper,
            },
            life_expectancy,
            max_population: dataset.max_value(Indicator::Population),
        })
    }

    /// Income axis bounds as base-10 exponents, as log-scaled renderers expect.
    #[must_use]
    pub fn income_log10(&self) -> (f64, f64) {
        (self.income.min.log10(), self.income.max.log10())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TidyRecord;

    #[test]
    fn income_axis_sits_above_global_maximum() {
        let dataset = TidyDataset::from_records(vec![
            TidyRecord {
                country: "A".into(),
                year: 2000,
                population: Some(5.0),
                life_expectancy: Some(50.0),
                gni_per_capita: Some(2000.0),
            },
            TidyRecord {
                country: "B".into(),
                year: 2000,
                population: Some(7.0),
                life_expectancy: Some(80.0),
                gni_per_capita: Some(50_000.0),
            },
        ])
        .unwrap();

        let bounds = ChartBounds::for_dataset(&dataset).unwrap();
        assert_eq!(bounds.income.min, INCOME_AXIS_FLOOR);
        assert!((bounds.income.max - 55_000.0).abs() < 1e-6);
        assert_eq!(
            bounds.life_expectancy,
            Some(AxisRange {
                min: 50.0,
                max: 80.0
            })
        );
        assert_eq!(bounds.max_population, Some(7.0));
        let (lo, _) = bounds.income_log10();
        assert_eq!(lo, 0.0);
    }

    #[test]
    fn no_income_means_no_bounds() {
        let dataset = TidyDataset::from_records(vec![TidyRecord::new("A", 2000)]).unwrap();
        assert!(ChartBounds::for_dataset(&dataset).is_none());
    }
}
