//! Wide-format table reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::fingerprint::Fingerprint;

/// Options for reading delimited indicator files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Non-blank preamble rows to skip before the header row.
    pub skip_rows: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_rows: 0,
        }
    }
}

/// A string-typed table as read from disk: one header row, padded rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Name used in diagnostics (usually the file stem).
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from in-memory headers and rows, normalizing both
    /// exactly as file reading does.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let rows = rows
            .iter()
            .map(|row| pad_row(row, headers.len()))
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with exactly this (normalized) header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Content hash over headers and cells. The table name is not included.
    pub fn fingerprint(&self) -> Fingerprint {
        let width = self.width().to_string();
        let fields = std::iter::once(width.as_str())
            .chain(self.headers.iter().map(String::as_str))
            .chain(self.rows.iter().flatten().map(String::as_str));
        Fingerprint::of_fields(fields)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn pad_row(record: &[String], width: usize) -> Vec<String> {
    (0..width)
        .map(|idx| record.get(idx).map(|v| normalize_cell(v)).unwrap_or_default())
        .collect()
}

/// Read a table from any reader.
pub fn parse_raw_table<R: Read>(name: &str, reader: R, options: &ReadOptions) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            table: name.to_string(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }

    let mut rows = raw_rows.into_iter().skip(options.skip_rows);
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyCsv {
            table: name.to_string(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let rows: Vec<Vec<String>> = rows.map(|row| pad_row(&row, headers.len())).collect();

    debug!(
        table = name,
        columns = headers.len(),
        rows = rows.len(),
        "read raw table"
    );
    Ok(RawTable {
        name: name.to_string(),
        headers,
        rows,
    })
}

/// Read a table from a file. The table is named after the file stem.
pub fn read_raw_table(path: &Path, options: &ReadOptions) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string();
    parse_raw_table(&name, file, options)
}
