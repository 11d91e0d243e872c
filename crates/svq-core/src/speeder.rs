//! Speeder detection from completion durations.
//!
//! The cutoff is relative, not absolute: a third of the population median.
//! Absolute cutoffs break the moment a questionnaire is longer or shorter
//! than the last one; the median self-calibrates per study.

use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, warn};

use svq_ingest::{cell_str, is_missing_cell};
use svq_model::{CaseInsensitiveSet, ScreeningOptions, SpeederThreshold};

use crate::columns::column_names;
use crate::duration::parse_duration_seconds;

/// Outcome of speeder detection. Missing timing data produces an empty
/// outcome with a warning, never an error.
#[derive(Debug, Clone, Default)]
pub struct SpeederOutcome {
    pub speeders: Vec<String>,
    pub threshold: Option<SpeederThreshold>,
    pub duration_column: Option<String>,
    pub warnings: Vec<String>,
}

/// Detect respondents who finished implausibly fast.
pub fn detect_speeders(
    df: &DataFrame,
    ids: &[String],
    options: &ScreeningOptions,
) -> SpeederOutcome {
    let mut outcome = SpeederOutcome::default();

    let lookup = CaseInsensitiveSet::new(column_names(df));
    let Some(duration_column) = options
        .duration_columns
        .iter()
        .find_map(|candidate| lookup.get(candidate))
        .map(String::from)
    else {
        let message = "no duration column found; speeder detection skipped".to_string();
        info!("{message}");
        outcome.warnings.push(message);
        return outcome;
    };
    let Ok(series) = df.column(&duration_column) else {
        return outcome;
    };

    let mut durations: Vec<Option<f64>> = Vec::with_capacity(df.height());
    let mut unparsable = 0usize;
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        if is_missing_cell(&value) {
            durations.push(None);
            continue;
        }
        let raw = cell_str(value);
        let parsed = parse_duration_seconds(&raw);
        if parsed.is_none() {
            unparsable += 1;
            warn!(
                value = %raw,
                "unparsable duration; respondent excluded from speeder detection"
            );
        }
        durations.push(parsed);
    }
    if unparsable > 0 {
        outcome.warnings.push(format!(
            "{unparsable} duration value(s) could not be parsed and were treated as missing"
        ));
    }

    let mut valid: Vec<f64> = durations
        .iter()
        .flatten()
        .copied()
        .filter(|seconds| *seconds > 0.0)
        .collect();
    if valid.is_empty() {
        let message = format!(
            "duration column {duration_column} has no valid values; speeder detection skipped"
        );
        info!("{message}");
        outcome.warnings.push(message);
        outcome.duration_column = Some(duration_column);
        return outcome;
    }

    valid.sort_by(f64::total_cmp);
    let median = median_of_sorted(&valid);
    let cutoff = median / options.speeder_divisor;

    for (id, duration) in ids.iter().zip(&durations) {
        if let Some(seconds) = duration
            && *seconds < cutoff
        {
            outcome.speeders.push(id.clone());
        }
    }

    info!(
        column = %duration_column,
        median_seconds = median,
        threshold_seconds = cutoff,
        speeders = outcome.speeders.len(),
        "speeder detection complete"
    );
    outcome.threshold = Some(SpeederThreshold::from_seconds(cutoff));
    outcome.duration_column = Some(duration_column);
    outcome
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
