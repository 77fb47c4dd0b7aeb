//! Tidy dataset builder.
//!
//! Turns the three wide indicator tables into one long-format dataset keyed
//! by `(country, year)`:
//!
//! - **tidy**: country column detection, wide-to-long pivot, tolerant typing,
//!   per-country forward-fill
//! - **merge**: `(country, year)` join and the drop-incomplete policy
//! - **cache**: memoization keyed by input content
//! - **frame**: Polars `DataFrame` export

pub mod cache;
pub mod error;
pub mod frame;
pub mod merge;
pub mod options;
pub mod tidy;

pub use cache::{CacheKey, CacheStats, DatasetCache};
pub use error::SchemaError;
pub use frame::{to_dataframe, write_csv};
pub use merge::{build_tidy_dataset, build_from_tables, merge_indicators};
pub use options::TidyOptions;
pub use tidy::{IndicatorSeries, LongRow, forward_fill, identify_country_column, tidy_indicator};
