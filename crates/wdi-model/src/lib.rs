//! Tidy world-indicator dataset model.
//!
//! This crate defines the long-format representation shared by the builder
//! and the presentation layer:
//!
//! - **indicator**: the three measured indicators and their column names
//! - **record**: one `(country, year)` observation carrying all indicators
//! - **dataset**: the ordered, immutable dataset and its read-only projections
//! - **chart**: axis bounds for the income/life-expectancy bubble chart

pub mod chart;
pub mod dataset;
pub mod error;
pub mod indicator;
pub mod record;

pub use chart::{AxisRange, ChartBounds, INCOME_AXIS_FLOOR, INCOME_AXIS_HEADROOM};
pub use dataset::{DatasetView, TidyDataset};
pub use error::{ModelError, Result};
pub use indicator::Indicator;
pub use record::{COUNTRY_COLUMN, TidyRecord, YEAR_COLUMN};
