// src/load/infer.rs

use rayon::prelude::*;
use tracing::debug;

use crate::frame::{parse_date, DType};

/// For each column, scan every row:
///  - Ignore empty cells
///  - Start with the full candidate set {int64, float64, date}; drop a
///    candidate on the first cell that fails its parse
///  - Exhausted candidates (or no non-empty cells at all) mean utf8
///  - Otherwise take the narrowest survivor: int64 over float64 over date
///
/// Columns are independent, so the scan runs column-parallel.
pub fn derive_dtypes(headers: &[String], rows: &[Vec<String>]) -> Vec<DType> {
    (0..headers.len())
        .into_par_iter()
        .map(|idx| infer_column(&headers[idx], idx, rows))
        .collect()
}

fn infer_column(name: &str, idx: usize, rows: &[Vec<String>]) -> DType {
    let mut saw_value = false;
    let (mut int_ok, mut float_ok, mut date_ok) = (true, true, true);

    for row in rows {
        let cell = match row.get(idx) {
            Some(c) if !c.is_empty() => c.as_str(),
            _ => continue,
        };
        saw_value = true;

        if int_ok && cell.parse::<i64>().is_err() {
            int_ok = false;
        }
        if float_ok && cell.parse::<f64>().is_err() {
            float_ok = false;
        }
        if date_ok && parse_date(cell).is_none() {
            date_ok = false;
        }
        if !int_ok && !float_ok && !date_ok {
            debug!("column `{}` has non-numeric, non-date cells, using utf8", name);
            return DType::Utf8;
        }
    }

    if !saw_value {
        debug!("no samples for `{}`, defaulting to utf8", name);
        return DType::Utf8;
    }

    if int_ok {
        DType::Int64
    } else if float_ok {
        DType::Float64
    } else {
        DType::Date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn headers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{}", i)).collect()
    }

    #[test]
    fn narrowest_numeric_type_wins() {
        let rows = rows(&[&["2011", "335.0"], &["2012", "300"], &["2015", "160.5"]]);
        assert_eq!(
            derive_dtypes(&headers(2), &rows),
            vec![DType::Int64, DType::Float64]
        );
    }

    #[test]
    fn mixed_int_and_float_resolves_to_float() {
        let rows = rows(&[&["4"], &["4.0"], &["2"]]);
        assert_eq!(derive_dtypes(&headers(1), &rows), vec![DType::Float64]);
    }

    #[test]
    fn dates_are_detected() {
        let rows = rows(&[&["2017-01-31"], &["2017/02/28"]]);
        assert_eq!(derive_dtypes(&headers(1), &rows), vec![DType::Date]);
    }

    #[test]
    fn empty_cells_do_not_break_inference() {
        let rows = rows(&[&["335.0"], &[""], &["160.0"]]);
        assert_eq!(derive_dtypes(&headers(1), &rows), vec![DType::Float64]);
    }

    #[test]
    fn conflicting_cells_fall_back_to_utf8() {
        let rows = rows(&[&["2011"], &["manual"]]);
        assert_eq!(derive_dtypes(&headers(1), &rows), vec![DType::Utf8]);
    }

    #[test]
    fn all_empty_column_defaults_to_utf8() {
        let rows = rows(&[&[""], &[""]]);
        assert_eq!(derive_dtypes(&headers(1), &rows), vec![DType::Utf8]);
    }
}
