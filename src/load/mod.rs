// src/load/mod.rs

pub mod infer;

use csv::ReaderBuilder;
use std::{collections::HashSet, fs::File, io::BufReader, path::Path};
use thiserror::Error;
use tracing::debug;

use crate::frame::{parse_date, Column, ColumnData, DType, Frame};
use infer::derive_dtypes;

/// The single failure surface of loading. A failed load yields no
/// partial frame.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("csv parse error in {path} at record {record}: {source}")]
    Csv {
        path: String,
        record: usize,
        source: csv::Error,
    },

    #[error("{path} has no header row")]
    EmptyFile { path: String },

    #[error("header at index {index} is empty after trimming")]
    EmptyHeader { index: usize },

    #[error("duplicate column name: {0}")]
    DuplicateHeader(String),

    #[error("record {record} has {got} fields, expected {expected}")]
    Ragged {
        record: usize,
        expected: usize,
        got: usize,
    },
}

/// Trim whitespace + strip one pair of wrapping quotes.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Read a comma-separated file with a header row into a typed `Frame`.
///
/// - The header row supplies column names (whitespace-trimmed; empty or
///   duplicate names are an error).
/// - Each column's dtype is inferred across all of its rows, numeric
///   parse first, falling back to utf8.
/// - Empty fields become nulls.
/// - A record whose field count differs from the header is ragged and
///   fails the whole load, as does a missing or unreadable path.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Frame, LoadError> {
    let path_disp = path.as_ref().display().to_string();
    let file = File::open(path.as_ref()).map_err(|source| LoadError::Io {
        path: path_disp.clone(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    // 1) Header row → trimmed, validated column names
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path_disp.clone(),
            record: 0,
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(LoadError::EmptyFile { path: path_disp });
    }
    let mut seen = HashSet::new();
    for (index, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(LoadError::EmptyHeader { index });
        }
        if !seen.insert(name.as_str()) {
            return Err(LoadError::DuplicateHeader(name.clone()));
        }
    }

    // 2) Data rows → cleaned cells, rectangular or bust
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (record, result) in rdr.records().enumerate() {
        let rec = result.map_err(|source| LoadError::Csv {
            path: path_disp.clone(),
            record,
            source,
        })?;
        if rec.len() != headers.len() {
            return Err(LoadError::Ragged {
                record,
                expected: headers.len(),
                got: rec.len(),
            });
        }
        rows.push(rec.iter().map(clean_str).collect());
    }

    // 3) Infer dtypes, then materialize typed columns
    let dtypes = derive_dtypes(&headers, &rows);
    let columns: Vec<Column> = headers
        .iter()
        .zip(&dtypes)
        .enumerate()
        .map(|(idx, (name, &dtype))| Column::new(name.clone(), build_column(dtype, idx, &rows)))
        .collect();

    debug!(rows = rows.len(), cols = columns.len(), "loaded {}", path_disp);

    let index = (0..rows.len()).collect();
    Ok(Frame::from_parts(columns, index))
}

fn cell<'a>(row: &'a [String], idx: usize) -> Option<&'a str> {
    match row.get(idx) {
        Some(c) if !c.is_empty() => Some(c.as_str()),
        _ => None,
    }
}

fn build_column(dtype: DType, idx: usize, rows: &[Vec<String>]) -> ColumnData {
    match dtype {
        DType::Int64 => ColumnData::Int64(
            rows.iter()
                .map(|r| cell(r, idx).and_then(|c| c.parse().ok()))
                .collect(),
        ),
        DType::Float64 => ColumnData::Float64(
            rows.iter()
                .map(|r| cell(r, idx).and_then(|c| c.parse().ok()))
                .collect(),
        ),
        DType::Date => ColumnData::Date(
            rows.iter()
                .map(|r| cell(r, idx).and_then(parse_date))
                .collect(),
        ),
        DType::Utf8 => ColumnData::Utf8(
            rows.iter()
                .map(|r| cell(r, idx).map(str::to_string))
                .collect(),
        ),
    }
}
