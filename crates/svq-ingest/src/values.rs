//! Missing-aware cell conversions for survey DataFrames.
//!
//! Survey exports mix numeric-looking codes, free text, and blanks in the
//! same frame, so every detector goes through these helpers instead of
//! assuming a column dtype. Integral floats are rendered without a decimal
//! point so that an id of `1042.0` compares and prints as `1042`.

use polars::prelude::AnyValue;

/// Converts a cell to its canonical string form. Null becomes the empty
/// string; numeric values lose trailing zeros.
pub fn cell_str(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "1" } else { "0" }.to_string(),
        other => other.to_string(),
    }
}

/// Converts a cell to f64, parsing string cells. None for null, blank, or
/// non-numeric content.
pub fn cell_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(ref s) => parse_f64(s.as_str()),
        _ => None,
    }
}

/// True for null cells and cells holding only whitespace.
pub fn is_missing_cell(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.as_str().trim().is_empty(),
        _ => false,
    }
}

/// Formats a float without trailing zeros, so integral values have no
/// decimal point at all.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Parses a string as f64, None for blank or non-numeric input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_float_renders_without_decimal_point() {
        assert_eq!(cell_str(AnyValue::Float64(1042.0)), "1042");
        assert_eq!(cell_str(AnyValue::Float64(3.50)), "3.5");
    }

    #[test]
    fn null_is_empty_and_missing() {
        assert_eq!(cell_str(AnyValue::Null), "");
        assert!(is_missing_cell(&AnyValue::Null));
        assert!(is_missing_cell(&AnyValue::String("   ")));
        assert!(!is_missing_cell(&AnyValue::String("0")));
    }

    #[test]
    fn string_cells_parse_as_numbers() {
        assert_eq!(cell_f64(AnyValue::String(" 4 ")), Some(4.0));
        assert_eq!(cell_f64(AnyValue::String("4.5")), Some(4.5));
        assert_eq!(cell_f64(AnyValue::String("spokojenost")), None);
        assert_eq!(cell_f64(AnyValue::String("")), None);
    }
}
