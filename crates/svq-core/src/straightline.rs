//! Straight-lining detection over rating batteries.
//!
//! A straight line in one short grid is weak evidence: genuine "everything
//! is a 3" opinions exist. The detector therefore counts straight-lined
//! batteries per respondent and only flags corroborated repeat offenders.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use polars::prelude::{AnyValue, DataFrame};
use regex::Regex;
use tracing::{debug, info};

use svq_ingest::{cell_f64, cell_str, is_missing_cell};
use svq_model::{BatteryGroup, QuestionDescriptor, QuestionType, ScreeningOptions};

use crate::columns::find_matching_columns;

/// Battery item columns are exported as `<base>__<n>`.
static BATTERY_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<base>\w+?)__\d+$").expect("battery item pattern"));

/// Value universe of a multi-select checkbox export. A column group whose
/// values never leave this set is not a rating scale, and identical values
/// per respondent are legitimate there.
const MULTI_SELECT_UNIVERSE: [f64; 3] = [0.0, 1.0, 2.0];

/// Outcome of battery discovery and straight-line scanning.
#[derive(Debug, Clone, Default)]
pub struct StraightLineOutcome {
    pub straight_liners: Vec<String>,
    pub battery_groups: Vec<BatteryGroup>,
    /// Longest discovered battery, 0 when none were found.
    pub battery_length: usize,
    pub warnings: Vec<String>,
}

/// Discover rating-battery column groups.
///
/// Structure first: rating-battery questions without an entry condition,
/// matched to dataset columns, kept when they reach the minimum item count.
/// Without structure the `<base>__<n>` naming convention is grouped instead,
/// dropping groups whose combined value universe marks them as multi-select.
pub fn discover_battery_groups(
    df: &DataFrame,
    descriptors: Option<&[QuestionDescriptor]>,
    options: &ScreeningOptions,
    warnings: &mut Vec<String>,
) -> Vec<BatteryGroup> {
    let mut groups = Vec::new();

    if let Some(descriptors) = descriptors {
        for descriptor in descriptors {
            if descriptor.question_type != QuestionType::RatingBattery
                || descriptor.has_entry_condition
            {
                continue;
            }
            let columns = find_matching_columns(df, &descriptor.code);
            if columns.is_empty() {
                let message = format!(
                    "battery {} has no matching dataset columns; skipped",
                    descriptor.code
                );
                warnings.push(message);
                continue;
            }
            if columns.len() < options.min_battery_items {
                debug!(
                    code = %descriptor.code,
                    items = columns.len(),
                    "battery below minimum item count; skipped"
                );
                continue;
            }
            groups.push(BatteryGroup::new(descriptor.code.clone(), columns));
        }
    }

    if groups.is_empty() {
        groups = heuristic_battery_groups(df, options);
        debug!(count = groups.len(), "battery groups by column pattern");
    } else {
        debug!(count = groups.len(), "battery groups from structure");
    }
    groups
}

fn heuristic_battery_groups(df: &DataFrame, options: &ScreeningOptions) -> Vec<BatteryGroup> {
    let mut by_base: std::collections::BTreeMap<String, Vec<String>> =
        std::collections::BTreeMap::new();
    for name in crate::columns::column_names(df) {
        if let Some(captures) = BATTERY_ITEM.captures(&name) {
            by_base
                .entry(captures["base"].to_string())
                .or_default()
                .push(name);
        }
    }

    let mut groups = Vec::new();
    for (base, mut columns) in by_base {
        if columns.len() < options.min_battery_items {
            continue;
        }
        columns.sort();
        if !is_numeric_group(df, &columns) {
            continue;
        }
        if is_multi_select_group(df, &columns) {
            debug!(code = %base, "column group looks multi-select; skipped");
            continue;
        }
        groups.push(BatteryGroup::new(base, columns));
    }
    groups
}

/// Every non-missing value in every group column parses as a number.
fn is_numeric_group(df: &DataFrame, columns: &[String]) -> bool {
    let mut any_value = false;
    for column in columns {
        let Ok(series) = df.column(column) else {
            return false;
        };
        for idx in 0..df.height() {
            let value = series.get(idx).unwrap_or(AnyValue::Null);
            if is_missing_cell(&value) {
                continue;
            }
            if cell_f64(value).is_none() {
                return false;
            }
            any_value = true;
        }
    }
    any_value
}

/// The group's combined value universe stays within {0, 1, 2}.
fn is_multi_select_group(df: &DataFrame, columns: &[String]) -> bool {
    let mut saw_any = false;
    for column in columns {
        let Ok(series) = df.column(column) else {
            continue;
        };
        for idx in 0..df.height() {
            let value = series.get(idx).unwrap_or(AnyValue::Null);
            if is_missing_cell(&value) {
                continue;
            }
            let Some(number) = cell_f64(value) else {
                continue;
            };
            saw_any = true;
            if !MULTI_SELECT_UNIVERSE.contains(&number) {
                return false;
            }
        }
    }
    saw_any
}

/// Scan battery groups for straight-lining respondents.
pub fn detect_straight_liners(
    df: &DataFrame,
    ids: &[String],
    groups: &[BatteryGroup],
    options: &ScreeningOptions,
) -> StraightLineOutcome {
    let battery_length = groups.iter().map(BatteryGroup::item_count).max().unwrap_or(0);
    let mut outcome = StraightLineOutcome {
        battery_groups: groups.to_vec(),
        battery_length,
        ..StraightLineOutcome::default()
    };
    if groups.is_empty() {
        let message = "no rating batteries found; straight-lining detection skipped".to_string();
        info!("{message}");
        outcome.warnings.push(message);
        return outcome;
    }

    let mut straight_counts: std::collections::HashMap<&str, usize> =
        std::collections::HashMap::new();
    for group in groups {
        let series: Vec<_> = group
            .columns
            .iter()
            .filter_map(|column| df.column(column).ok())
            .collect();
        for (idx, id) in ids.iter().enumerate() {
            let mut values = Vec::new();
            for column in &series {
                let value = column.get(idx).unwrap_or(AnyValue::Null);
                if !is_missing_cell(&value) {
                    values.push(cell_str(value));
                }
            }
            if values.len() >= options.min_battery_items
                && values.iter().all(|value| value == &values[0])
            {
                *straight_counts.entry(id.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut flagged = BTreeSet::new();
    for id in ids {
        if straight_counts.get(id.as_str()).copied().unwrap_or(0)
            >= options.min_corroborating_batteries
            && flagged.insert(id.as_str())
        {
            outcome.straight_liners.push(id.clone());
        }
    }
    info!(
        straight_liners = outcome.straight_liners.len(),
        batteries = groups.len(),
        battery_length,
        "straight-lining scan complete"
    );
    outcome
}
