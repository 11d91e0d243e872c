//! Open-ended answer quality classification.
//!
//! Combines per-answer scores and the cross-answer similarity penalty into a
//! per-respondent risk class, and discovers which dataset columns hold
//! open-ended answers in the first place.

use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, warn};

use svq_ingest::{cell_f64, cell_str, is_missing_cell};
use svq_model::{OpenEndedRisk, QuestionDescriptor, QuestionType, ScreeningOptions};

use crate::columns::{column_names, find_matching_columns};

/// Classify a respondent from their answer scores and similarity penalty.
/// No scored answers means no evidence, which is `Ok`, not suspicion.
pub fn classify(scores: &[f64], penalty: f64, options: &ScreeningOptions) -> OpenEndedRisk {
    if scores.is_empty() {
        return OpenEndedRisk::Ok;
    }
    let avg = scores.iter().sum::<f64>() / scores.len() as f64;
    let adjusted = avg - penalty;
    if adjusted <= options.high_risk_threshold {
        OpenEndedRisk::HighRisk
    } else if adjusted <= options.medium_risk_threshold {
        OpenEndedRisk::MediumRisk
    } else {
        OpenEndedRisk::Ok
    }
}

/// Resolve the open-ended answer columns.
///
/// Prefers questionnaire structure: open-text questions without an entry
/// condition, matched to dataset columns by code. Questions with no matching
/// column are skipped with a recorded warning. Without structure (or when
/// nothing matches) every plausibly-textual column is taken instead.
pub fn open_text_columns(
    df: &DataFrame,
    descriptors: Option<&[QuestionDescriptor]>,
    options: &ScreeningOptions,
    warnings: &mut Vec<String>,
) -> Vec<String> {
    let mut columns = Vec::new();

    if let Some(descriptors) = descriptors {
        for descriptor in descriptors {
            if descriptor.question_type != QuestionType::OpenText
                || descriptor.has_entry_condition
            {
                continue;
            }
            let matches = find_matching_columns(df, &descriptor.code);
            if matches.is_empty() {
                let message = format!(
                    "open question {} has no matching dataset column; skipped",
                    descriptor.code
                );
                warn!("{message}");
                warnings.push(message);
                continue;
            }
            columns.extend(matches);
        }
    }

    // Dedup while keeping dataset order: one battery-style code can match a
    // column that another code's substring fallback also hits.
    let mut seen = std::collections::BTreeSet::new();
    columns.retain(|column| seen.insert(column.clone()));

    if columns.is_empty() {
        columns = heuristic_text_columns(df, options);
        debug!(count = columns.len(), "open-ended columns by heuristic");
    } else {
        debug!(count = columns.len(), "open-ended columns from structure");
    }
    columns
}

/// Fallback discovery: textual columns that are not export bookkeeping and
/// whose answers are longer than bare codes.
fn heuristic_text_columns(df: &DataFrame, options: &ScreeningOptions) -> Vec<String> {
    let mut columns = Vec::new();
    for name in column_names(df) {
        if options.system_columns.contains(&name) {
            continue;
        }
        if options
            .excluded_column_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
        {
            continue;
        }
        if options
            .excluded_column_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            continue;
        }
        if is_textual_column(df, &name, options.min_open_text_len) {
            columns.push(name);
        }
    }
    columns
}

/// A column is textual when it has non-missing values, at least one of them
/// does not parse as a number, and the average value length is above the
/// configured minimum (rating codes are one or two characters).
fn is_textual_column(df: &DataFrame, column: &str, min_avg_len: f64) -> bool {
    let Ok(series) = df.column(column) else {
        return false;
    };
    let mut non_missing = 0usize;
    let mut numeric = 0usize;
    let mut total_len = 0usize;
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_cell(&value) {
            continue;
        }
        non_missing += 1;
        if cell_f64(value.clone()).is_some() {
            numeric += 1;
        }
        total_len += cell_str(value).chars().count();
    }
    if non_missing == 0 || numeric == non_missing {
        return false;
    }
    total_len as f64 / non_missing as f64 > min_avg_len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        svq_ingest::dataframe_from_columns(
            columns.iter().map(|(name, _)| (*name).to_string()).collect(),
            columns
                .into_iter()
                .map(|(_, values)| values.into_iter().map(String::from).collect())
                .collect(),
        )
        .unwrap()
    }

    fn open_question(code: &str) -> QuestionDescriptor {
        QuestionDescriptor {
            code: code.to_string(),
            text: String::new(),
            question_type: QuestionType::OpenText,
            options: vec![],
            has_entry_condition: false,
        }
    }

    #[test]
    fn classify_thresholds() {
        let options = ScreeningOptions::default();
        assert_eq!(classify(&[], 0.0, &options), OpenEndedRisk::Ok);
        assert_eq!(classify(&[0.2], 0.0, &options), OpenEndedRisk::HighRisk);
        assert_eq!(classify(&[0.3], 0.0, &options), OpenEndedRisk::MediumRisk);
        assert_eq!(classify(&[0.65], 0.0, &options), OpenEndedRisk::Ok);
        // The penalty can push an otherwise acceptable average down a band.
        assert_eq!(classify(&[0.45], 0.15, &options), OpenEndedRisk::MediumRisk);
    }

    #[test]
    fn structure_driven_columns_skip_unmatched_questions() {
        let df = frame(vec![
            ("QA1", vec!["text"]),
            ("QB9", vec!["text"]),
        ]);
        let descriptors = vec![open_question("A1"), open_question("Z9")];
        let mut warnings = Vec::new();
        let columns = open_text_columns(
            &df,
            Some(&descriptors),
            &ScreeningOptions::default(),
            &mut warnings,
        );
        assert_eq!(columns, ["QA1"]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Z9"));
    }

    #[test]
    fn gated_open_questions_are_ignored() {
        let df = frame(vec![("QA1", vec!["text"])]);
        let mut gated = open_question("A1");
        gated.has_entry_condition = true;
        let mut warnings = Vec::new();
        let columns = open_text_columns(
            &df,
            Some(&[gated]),
            &ScreeningOptions::default(),
            &mut warnings,
        );
        // Structure produced nothing, so the heuristic takes over and still
        // finds the textual column.
        assert_eq!(columns, ["QA1"]);
    }

    #[test]
    fn heuristic_skips_system_numeric_and_short_columns() {
        let df = frame(vec![
            ("ExternalId", vec!["r1", "r2"]),
            ("duration", vec!["60", "90"]),
            ("QA2__1", vec!["3", "4"]),
            ("UserAgent", vec!["Mozilla/5.0", "Mozilla/5.0"]),
            ("QA9_jina", vec!["jiné značky", "jiná odpověď"]),
            ("QA5", vec!["dobrý produkt", "nic mě nenapadá"]),
        ]);
        let mut warnings = Vec::new();
        let columns =
            open_text_columns(&df, None, &ScreeningOptions::default(), &mut warnings);
        assert_eq!(columns, ["QA5"]);
    }
}
