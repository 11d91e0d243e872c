//! Dataset column discovery: question-code matching and ID column election.

use polars::prelude::{AnyValue, DataFrame};
use tracing::debug;

use svq_ingest::{cell_str, is_missing_cell};
use svq_model::{CaseInsensitiveSet, ScreeningOptions};

/// All column names of the frame, in dataset order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Find dataset columns for a questionnaire code.
///
/// Exports prefix codes with `Q` (or `QQ` when the code itself starts with
/// `Q`) and number battery items with a double-underscore suffix. When no
/// prefixed form matches, any column containing the code is accepted as a
/// last resort.
pub fn find_matching_columns(df: &DataFrame, code: &str) -> Vec<String> {
    let code_clean = code.replace('.', "").trim().to_uppercase();
    if code_clean.is_empty() {
        return Vec::new();
    }
    let exact = [format!("Q{code_clean}"), format!("QQ{code_clean}")];
    let prefixes = [format!("Q{code_clean}__"), format!("QQ{code_clean}__")];

    let names = column_names(df);
    let mut matches: Vec<String> = names
        .iter()
        .filter(|name| {
            let upper = name.to_uppercase();
            exact.contains(&upper) || prefixes.iter().any(|prefix| upper.starts_with(prefix))
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        matches = names
            .iter()
            .filter(|name| name.to_uppercase().contains(&code_clean))
            .cloned()
            .collect();
    }
    matches
}

/// Elect the respondent ID column.
///
/// Candidates are tried in configured order and must identify more than half
/// the rows uniquely; then any column with "id" in its name gets the same
/// chance; the first dataset column is the fallback of last resort.
pub fn find_id_column(df: &DataFrame, options: &ScreeningOptions) -> String {
    let names = column_names(df);
    let lookup = CaseInsensitiveSet::new(&names);

    for candidate in &options.id_candidates {
        if let Some(column) = lookup.get(candidate)
            && is_mostly_unique(df, column)
        {
            debug!(column, "id column from candidate list");
            return column.to_string();
        }
    }
    for name in &names {
        if name.to_lowercase().contains("id")
            && !options.id_exclude.iter().any(|excluded| excluded == name)
            && is_mostly_unique(df, name)
        {
            debug!(column = %name, "id column by name heuristic");
            return name.clone();
        }
    }
    names.first().cloned().unwrap_or_default()
}

/// Canonical respondent ids, one per row, in row order. Numeric cells render
/// through [`cell_str`], so an integral float id prints without a decimal
/// point; string ids are kept verbatim apart from trimming. Blanks stay blank
/// and are filtered at aggregation.
pub fn respondent_ids(df: &DataFrame, id_column: &str) -> Vec<String> {
    let Ok(series) = df.column(id_column) else {
        return vec![String::new(); df.height()];
    };
    (0..df.height())
        .map(|idx| {
            cell_str(series.get(idx).unwrap_or(AnyValue::Null))
                .trim()
                .to_string()
        })
        .collect()
}

fn is_mostly_unique(df: &DataFrame, column: &str) -> bool {
    let Ok(series) = df.column(column) else {
        return false;
    };
    let mut seen = std::collections::BTreeSet::new();
    let mut non_missing = 0usize;
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_cell(&value) {
            continue;
        }
        non_missing += 1;
        seen.insert(cell_str(value));
    }
    non_missing > 0 && seen.len() as f64 > df.height() as f64 * 0.5
}
