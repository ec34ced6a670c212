// src/frame/dtype.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column type, inferred once at load time and fixed thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int64,
    Float64,
    Date,
    Utf8,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Date => "date",
            DType::Utf8 => "utf8",
        };
        f.write_str(s)
    }
}

/// A single cell. `Null` marks a missing/empty field, distinct from zero
/// or the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Str(String),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell; `None` for dates, strings and nulls.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Cell rendered for display and grouping. Nulls render empty.
    pub fn render(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Str(s) => s.clone(),
            Value::Null => String::new(),
        }
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse `"YYYY-MM-DD"` or `"YYYY/MM/DD"` into a date. Returns `None` for
/// anything else, including partial timestamps.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_date_separators() {
        let expected = NaiveDate::from_ymd_opt(2017, 3, 5).unwrap();
        assert_eq!(parse_date("2017-03-05"), Some(expected));
        assert_eq!(parse_date("2017/03/05"), Some(expected));
        assert_eq!(parse_date("2017-3-5"), Some(expected));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2017"), None);
        assert_eq!(parse_date("2017-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(Value::Null.render(), "");
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn as_f64_covers_both_numeric_types() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Str("2.5".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }
}
