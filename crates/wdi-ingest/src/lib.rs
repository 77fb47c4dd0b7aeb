//! Indicator table ingestion.
//!
//! This crate reads the wide-format indicator files (one row per country,
//! one column per year) into string-typed [`RawTable`]s. It does not
//! interpret cells; typing and reshaping happen in `wdi-transform`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wdi_ingest::{ReadOptions, SourceFiles};
//!
//! let sources = SourceFiles::in_dir(Path::new("data"));
//! let tables = sources.load(&ReadOptions::default())?;
//! println!("{} population rows", tables.population.height());
//! ```

mod discovery;
mod error;
mod fingerprint;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Reading ===
pub use table::{RawTable, ReadOptions, parse_raw_table, read_raw_table};

// === Source Discovery ===
pub use discovery::{RawTables, SourceFiles};

// === Fingerprints ===
pub use fingerprint::Fingerprint;
