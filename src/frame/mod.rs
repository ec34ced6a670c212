// src/frame/mod.rs

pub mod display;
pub mod dtype;

pub use dtype::{parse_date, DType, Value};

use chrono::NaiveDate;
use thiserror::Error;

use crate::schema::FieldMeta;

/// Errors from frame construction and column-addressed operations.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column already exists: {0}")]
    ColumnExists(String),

    #[error("column `{column}` has dtype {dtype}, expected a numeric column")]
    TypeMismatch { column: String, dtype: DType },

    #[error("column `{column}` has {got} rows, frame has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
}

/// Typed columnar storage. One vector per column, `None` marking absent cells.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Date(Vec<Option<NaiveDate>>),
    Utf8(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            ColumnData::Int64(_) => DType::Int64,
            ColumnData::Float64(_) => DType::Float64,
            ColumnData::Date(_) => DType::Date,
            ColumnData::Utf8(_) => DType::Utf8,
        }
    }

    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Int64(v) => v[row].map_or(Value::Null, Value::Int),
            ColumnData::Float64(v) => v[row].map_or(Value::Null, Value::Float),
            ColumnData::Date(v) => v[row].map_or(Value::Null, Value::Date),
            ColumnData::Utf8(v) => v[row]
                .as_ref()
                .map_or(Value::Null, |s| Value::Str(s.clone())),
        }
    }

    /// Gather the given row positions into a new column, in order.
    /// Positions may repeat.
    pub(crate) fn take(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Int64(v) => ColumnData::Int64(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Float64(v) => ColumnData::Float64(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Date(v) => ColumnData::Date(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Utf8(v) => {
                ColumnData::Utf8(rows.iter().map(|&r| v[r].clone()).collect())
            }
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Column {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn value(&self, row: usize) -> Value {
        self.data.value(row)
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Iterate the column as `Value`s, nulls included.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(move |r| self.data.value(r))
    }
}

/// In-memory table: ordered typed columns of equal length, plus a row index
/// recording each row's position in the source file. Derived frames (head,
/// tail, filters) keep the original positions, so the last rows of a file
/// display with their source indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Column>,
    index: Vec<usize>,
}

impl Frame {
    /// Build a frame from columns, indexing rows 0..n in source order.
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        let n_rows = columns.first().map_or(0, Column::len);
        for col in &columns {
            if col.len() != n_rows {
                return Err(FrameError::LengthMismatch {
                    column: col.name().to_string(),
                    expected: n_rows,
                    got: col.len(),
                });
            }
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == col.name()) {
                return Err(FrameError::ColumnExists(col.name().to_string()));
            }
        }
        let index = (0..n_rows).collect();
        Ok(Frame { columns, index })
    }

    pub(crate) fn from_parts(columns: Vec<Column>, index: Vec<usize>) -> Self {
        Frame { columns, index }
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Source-file row position of each row in this frame.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub(crate) fn column_pos(&self, name: &str) -> Result<usize, FrameError> {
        self.columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Cell at (row, column name); `None` when either does not exist.
    pub fn value(&self, row: usize, name: &str) -> Option<Value> {
        if row >= self.n_rows() {
            return None;
        }
        self.column(name).map(|c| c.value(row))
    }

    /// Name and dtype of every column, in order.
    pub fn dtypes(&self) -> Vec<FieldMeta> {
        self.columns
            .iter()
            .map(|c| FieldMeta {
                name: c.name().to_string(),
                dtype: c.dtype(),
            })
            .collect()
    }

    /// First `n` rows, or the whole frame when `n >= n_rows()`.
    pub fn head(&self, n: usize) -> Frame {
        let take: Vec<usize> = (0..self.n_rows().min(n)).collect();
        self.take_rows(&take)
    }

    /// Last `n` rows, original row indices preserved.
    pub fn tail(&self, n: usize) -> Frame {
        let start = self.n_rows().saturating_sub(n);
        let take: Vec<usize> = (start..self.n_rows()).collect();
        self.take_rows(&take)
    }

    /// Gather the given positions (relative to this frame) into a new frame.
    /// The new frame's index carries the original source positions.
    pub(crate) fn take_rows(&self, rows: &[usize]) -> Frame {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.data.take(rows)))
            .collect();
        let index = rows.iter().map(|&r| self.index[r]).collect();
        Frame { columns, index }
    }
}
