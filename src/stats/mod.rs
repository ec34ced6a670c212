// src/stats/mod.rs

use serde::Serialize;
use std::collections::HashMap;

use crate::frame::{DType, Frame, FrameError};

/// Descriptive statistics for one numeric column. Moments are `None`
/// when too few non-null values exist to compute them.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub column: String,
    /// Non-null cell count.
    pub count: usize,
    pub nulls: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1); needs at least two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize every numeric (int64/float64) column of the frame.
pub fn describe(frame: &Frame) -> Vec<ColumnStats> {
    frame
        .columns()
        .iter()
        .filter(|c| matches!(c.dtype(), DType::Int64 | DType::Float64))
        .map(|col| {
            let values: Vec<f64> = col.values().filter_map(|v| v.as_f64()).collect();
            let count = values.len();
            let nulls = col.len() - count;

            let mean = if count > 0 {
                Some(values.iter().sum::<f64>() / count as f64)
            } else {
                None
            };
            let std = mean.filter(|_| count > 1).map(|m| {
                let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
                (ss / (count - 1) as f64).sqrt()
            });
            let min = values.iter().copied().reduce(f64::min);
            let max = values.iter().copied().reduce(f64::max);

            ColumnStats {
                column: col.name().to_string(),
                count,
                nulls,
                mean,
                std,
                min,
                max,
            }
        })
        .collect()
}

/// Occurrence counts of the rendered non-null values in `column`,
/// descending by count, ties broken by value.
pub fn value_counts(frame: &Frame, column: &str) -> Result<Vec<(String, usize)>, FrameError> {
    let col = frame
        .column(column)
        .ok_or_else(|| FrameError::ColumnNotFound(column.to_string()))?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in col.values() {
        if value.is_null() {
            continue;
        }
        *counts.entry(value.render()).or_insert(0) += 1;
    }

    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(out)
}
