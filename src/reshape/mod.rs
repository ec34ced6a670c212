// src/reshape/mod.rs

pub mod group;

pub use group::{group_mean, top_n};

use chrono::NaiveDate;
use tracing::debug;

use crate::frame::{parse_date, Column, ColumnData, Frame, FrameError, Value};

/// Options for `melt`. Defaults mirror the usual wide-to-long unpivot:
/// variable/value output names, date-parsed variable column, null values
/// dropped.
#[derive(Debug, Clone)]
pub struct MeltOptions {
    /// Columns kept as identifiers, repeated for every emitted row.
    pub id_vars: Vec<String>,
    pub var_name: String,
    pub value_name: String,
    /// When every melted column name parses as a date, type the variable
    /// column as `Date`.
    pub parse_dates: bool,
    /// Drop emitted rows whose value is null.
    pub drop_null: bool,
}

impl Default for MeltOptions {
    fn default() -> Self {
        MeltOptions {
            id_vars: Vec::new(),
            var_name: "variable".into(),
            value_name: "value".into(),
            parse_dates: true,
            drop_null: true,
        }
    }
}

/// Remove the named columns. Unknown names are an error; row index is
/// untouched.
pub fn drop_columns(frame: &Frame, names: &[&str]) -> Result<Frame, FrameError> {
    for name in names {
        frame.column_pos(name)?;
    }
    let columns = frame
        .columns()
        .iter()
        .filter(|c| !names.contains(&c.name()))
        .cloned()
        .collect();
    Ok(Frame::from_parts(columns, frame.index().to_vec()))
}

/// Retain rows whose cell in `column` satisfies the predicate. Original
/// source indices are preserved.
pub fn filter_rows<F>(frame: &Frame, column: &str, pred: F) -> Result<Frame, FrameError>
where
    F: Fn(&Value) -> bool,
{
    let pos = frame.column_pos(column)?;
    let col = &frame.columns()[pos];
    let keep: Vec<usize> = (0..frame.n_rows())
        .filter(|&r| pred(&col.value(r)))
        .collect();
    Ok(frame.take_rows(&keep))
}

/// Unpivot every non-id column into `(variable, value)` rows.
///
/// The value column is numeric: int and float cells carry over, string
/// cells are parsed, everything else melts to null. Output rows are
/// emitted row-major (all variables of source row 0, then row 1, ...),
/// and the output index is positional since a melted row has no single
/// source row.
pub fn melt(frame: &Frame, opts: &MeltOptions) -> Result<Frame, FrameError> {
    let id_pos = opts
        .id_vars
        .iter()
        .map(|n| frame.column_pos(n))
        .collect::<Result<Vec<_>, _>>()?;
    for name in [&opts.var_name, &opts.value_name] {
        if opts.id_vars.contains(name) {
            return Err(FrameError::ColumnExists(name.clone()));
        }
    }

    let value_pos: Vec<usize> = (0..frame.n_cols())
        .filter(|i| !id_pos.contains(i))
        .collect();
    let var_names: Vec<&str> = value_pos
        .iter()
        .map(|&i| frame.columns()[i].name())
        .collect();

    // Variable column becomes Date only when every melted name parses
    let var_dates: Option<Vec<NaiveDate>> = if opts.parse_dates {
        var_names.iter().map(|n| parse_date(n)).collect()
    } else {
        None
    };

    // Emissions: (source row, variable slot, numeric value)
    let mut src_rows: Vec<usize> = Vec::new();
    let mut slots: Vec<usize> = Vec::new();
    let mut values: Vec<Option<f64>> = Vec::new();
    for row in 0..frame.n_rows() {
        for (slot, &vp) in value_pos.iter().enumerate() {
            let v = numeric_cell(&frame.columns()[vp].value(row));
            if opts.drop_null && v.is_none() {
                continue;
            }
            src_rows.push(row);
            slots.push(slot);
            values.push(v);
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(id_pos.len() + 2);
    for &ip in &id_pos {
        let col = &frame.columns()[ip];
        columns.push(Column::new(col.name(), col.data().take(&src_rows)));
    }
    let var_data = match &var_dates {
        Some(dates) => ColumnData::Date(slots.iter().map(|&s| Some(dates[s])).collect()),
        None => ColumnData::Utf8(
            slots
                .iter()
                .map(|&s| Some(var_names[s].to_string()))
                .collect(),
        ),
    };
    columns.push(Column::new(opts.var_name.clone(), var_data));
    columns.push(Column::new(
        opts.value_name.clone(),
        ColumnData::Float64(values),
    ));

    debug!(
        rows = src_rows.len(),
        vars = var_names.len(),
        "melted {} source rows",
        frame.n_rows()
    );

    let index = (0..src_rows.len()).collect();
    Ok(Frame::from_parts(columns, index))
}

fn numeric_cell(value: &Value) -> Option<f64> {
    match value {
        Value::Str(s) => s.trim().parse().ok(),
        other => other.as_f64(),
    }
}
