//! CSV survey export loading.
//!
//! Exports arrive as one row per respondent with a single header row. All
//! columns are loaded as strings; typing decisions (numeric codes vs free
//! text) are made downstream per detector, because survey platforms encode
//! rating scales, ids, and text into the same flat CSV.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

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

/// Deduplicate headers in place: blanks become positional names, repeats get
/// a numeric suffix. Exports with merged header cells produce both.
fn resolve_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (index, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("column_{}", index + 1)
        } else {
            name
        };
        let count = seen.entry(base.to_uppercase()).or_insert(0usize);
        *count += 1;
        if *count == 1 {
            headers.push(base);
        } else {
            headers.push(format!("{}_{}", base, count));
        }
    }
    headers
}

/// Read a survey CSV export into a string-column DataFrame.
///
/// Rows shorter than the header are padded with empty cells, longer rows are
/// truncated; both are common in hand-edited exports and neither should
/// abort a screening run.
pub fn read_survey_csv(path: &Path) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;

    let mut records = reader.records();
    let header_record = records
        .next()
        .ok_or_else(|| anyhow!("csv {} is empty", path.display()))?
        .with_context(|| format!("read csv header {}", path.display()))?;
    let headers = resolve_headers(
        header_record
            .iter()
            .map(normalize_header)
            .collect::<Vec<_>>(),
    );

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in records {
        let record = record.with_context(|| format!("read csv row {}", path.display()))?;
        for (index, column) in columns.iter_mut().enumerate() {
            let cell = record.get(index).map(normalize_cell).unwrap_or_default();
            column.push(cell);
        }
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = columns.first().map_or(0, std::vec::Vec::len),
        "loaded survey csv"
    );
    dataframe_from_columns(headers, columns)
}

/// Assemble a string-column DataFrame from already-parsed data.
pub fn dataframe_from_columns(
    headers: Vec<String>,
    columns: Vec<Vec<String>>,
) -> Result<DataFrame> {
    let cols: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.as_str().into(), values).into_column())
        .collect();
    DataFrame::new(cols).context("assemble dataframe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_strips_bom_and_collapses_whitespace() {
        assert_eq!(normalize_header("\u{feff}ExternalId"), "ExternalId");
        assert_eq!(normalize_header("  interview   length "), "interview length");
    }

    #[test]
    fn blank_and_duplicate_headers_are_resolved() {
        let headers = resolve_headers(vec![
            "QA1".to_string(),
            String::new(),
            "QA1".to_string(),
        ]);
        assert_eq!(headers, ["QA1", "column_2", "QA1_2"]);
    }

    #[test]
    fn dataframe_assembles_from_columns() {
        let df = dataframe_from_columns(
            vec!["ExternalId".to_string(), "QA1".to_string()],
            vec![
                vec!["r1".to_string(), "r2".to_string()],
                vec!["ano".to_string(), String::new()],
            ],
        )
        .unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
    }
}
