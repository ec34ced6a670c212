// src/reshape/group.rs

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::frame::{Column, ColumnData, DType, Frame, FrameError};

struct Acc {
    first_row: usize,
    sum: f64,
    count: usize,
}

/// Group rows by the rendered key tuple and average the non-null values
/// of `value`. Output: the key columns plus a `mean_<value>` column, one
/// row per group in first-seen order. Groups with only nulls yield null.
pub fn group_mean(frame: &Frame, keys: &[&str], value: &str) -> Result<Frame, FrameError> {
    let key_pos = keys
        .iter()
        .map(|n| frame.column_pos(n))
        .collect::<Result<Vec<_>, _>>()?;
    let value_pos = frame.column_pos(value)?;
    let value_col = &frame.columns()[value_pos];
    if !matches!(value_col.dtype(), DType::Int64 | DType::Float64) {
        return Err(FrameError::TypeMismatch {
            column: value.to_string(),
            dtype: value_col.dtype(),
        });
    }

    let mut groups: Vec<Acc> = Vec::new();
    let mut lookup: HashMap<Vec<String>, usize> = HashMap::new();
    for row in 0..frame.n_rows() {
        let key: Vec<String> = key_pos
            .iter()
            .map(|&p| frame.columns()[p].value(row).render())
            .collect();
        let slot = *lookup.entry(key).or_insert_with(|| {
            groups.push(Acc {
                first_row: row,
                sum: 0.0,
                count: 0,
            });
            groups.len() - 1
        });
        if let Some(x) = value_col.value(row).as_f64() {
            groups[slot].sum += x;
            groups[slot].count += 1;
        }
    }

    let first_rows: Vec<usize> = groups.iter().map(|g| g.first_row).collect();
    let mut columns: Vec<Column> = key_pos
        .iter()
        .map(|&p| {
            let col = &frame.columns()[p];
            Column::new(col.name(), col.data().take(&first_rows))
        })
        .collect();
    let means: Vec<Option<f64>> = groups
        .iter()
        .map(|g| (g.count > 0).then(|| g.sum / g.count as f64))
        .collect();
    columns.push(Column::new(
        format!("mean_{}", value),
        ColumnData::Float64(means),
    ));

    let index = (0..first_rows.len()).collect();
    Ok(Frame::from_parts(columns, index))
}

/// Rows sorted by the numeric `column` descending (nulls last), truncated
/// to `n`. Ties keep source order; source indices are preserved.
pub fn top_n(frame: &Frame, column: &str, n: usize) -> Result<Frame, FrameError> {
    let pos = frame.column_pos(column)?;
    let col = &frame.columns()[pos];
    if !matches!(col.dtype(), DType::Int64 | DType::Float64) {
        return Err(FrameError::TypeMismatch {
            column: column.to_string(),
            dtype: col.dtype(),
        });
    }

    let mut order: Vec<usize> = (0..frame.n_rows()).collect();
    order.sort_by(|&a, &b| {
        match (col.value(a).as_f64(), col.value(b).as_f64()) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    order.truncate(n);

    Ok(frame.take_rows(&order))
}
