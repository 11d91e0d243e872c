//! Exclusion-syntax generation.
//!
//! Produces an SPSS-style deletion script with three variants in one file:
//! delete everything flagged (active), delete high risk only, delete high
//! plus medium (both commented out). The analyst keeps one variant and
//! removes the others; the statistics header documents what the run found.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use svq_model::ScreeningResult;

/// IDs per line in generated `ANY(...)` lists.
const IDS_PER_LINE: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct SyntaxOptions {
    /// Override the timestamp in the header, used by tests for stable output.
    pub generated_at: Option<String>,
}

/// Generate the exclusion syntax for a screening result.
pub fn generate_exclusion_syntax(result: &ScreeningResult, options: &SyntaxOptions) -> String {
    let generated_at = options
        .generated_at
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

    let mut lines: Vec<String> = Vec::new();
    lines.push(rule_line());
    lines.push("* Respondent quality screening - exclusion syntax.".to_string());
    lines.push(format!("* Generated: {generated_at}."));
    lines.push(rule_line());
    lines.push(format!(
        "* Total respondents: {}.",
        result.total_respondents
    ));
    lines.push(format!("* Speeders: {}.", result.speeders.len()));
    if let Some(threshold) = result.speeder_threshold {
        lines.push(format!(
            "* Speeder threshold: < {:.0}s ({:.1} min).",
            threshold.seconds, threshold.minutes
        ));
    }
    lines.push(format!(
        "* Open-ended high risk: {}.",
        result.open_high.len()
    ));
    lines.push(format!(
        "* Open-ended medium risk: {}.",
        result.open_medium.len()
    ));
    lines.push(format!(
        "* Straight-liners: {} (battery length {}).",
        result.straight_liners.len(),
        result.battery_length
    ));
    lines.push(format!("* Total flagged: {}.", result.all_bad.len()));
    lines.push(format!(
        "* HIGH RISK (recommend delete): {}.",
        result.recommendations.high_risk.len()
    ));
    lines.push(format!(
        "* MEDIUM RISK (consider delete): {}.",
        result.recommendations.medium_risk.len()
    ));
    lines.push(rule_line());
    lines.push(String::new());

    let high = &result.recommendations.high_risk;
    let high_medium: Vec<String> = high
        .iter()
        .chain(result.recommendations.medium_risk.iter())
        .cloned()
        .collect();

    push_variant(
        &mut lines,
        &format!("VARIANT 1: delete ALL flagged ({})", result.all_bad.len()),
        &result.id_column,
        &result.all_bad,
        false,
    );
    push_variant(
        &mut lines,
        &format!("VARIANT 2: delete HIGH RISK only ({})", high.len()),
        &result.id_column,
        high,
        true,
    );
    push_variant(
        &mut lines,
        &format!("VARIANT 3: delete HIGH + MEDIUM RISK ({})", high_medium.len()),
        &result.id_column,
        &high_medium,
        true,
    );

    lines.push("* === END OF SYNTAX ===.".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Generate and write the syntax file.
pub fn write_exclusion_syntax(
    path: &Path,
    result: &ScreeningResult,
    options: &SyntaxOptions,
) -> Result<()> {
    let syntax = generate_exclusion_syntax(result, options);
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("create syntax file {}", path.display()))?;
    file.write_all(syntax.as_bytes())
        .with_context(|| format!("write syntax file {}", path.display()))?;
    Ok(())
}

fn rule_line() -> String {
    format!("* {}.", "=".repeat(72))
}

fn push_variant(
    lines: &mut Vec<String>,
    title: &str,
    id_column: &str,
    ids: &[String],
    commented: bool,
) {
    lines.push(format!("* === {title} ===."));
    if ids.is_empty() {
        lines.push("* No respondents in this category.".to_string());
        lines.push(String::new());
        return;
    }
    let prefix = if commented { "* " } else { "" };
    lines.push(format!("{prefix}SELECT IF NOT ANY({id_column},"));
    let formatted: Vec<String> = ids.iter().map(|id| format_id(id)).collect();
    for (index, chunk) in formatted.chunks(IDS_PER_LINE).enumerate() {
        let terminator = if (index + 1) * IDS_PER_LINE >= formatted.len() {
            ")."
        } else {
            ","
        };
        lines.push(format!("{prefix}    {}{terminator}", chunk.join(", ")));
    }
    lines.push(format!("{prefix}EXECUTE."));
    lines.push(String::new());
}

/// Integer ids go bare, anything else is quoted. Canonicalization upstream
/// already renders numeric id cells as plain integers, so only values that
/// round-trip through `i64` unchanged can be treated as numeric; "007" keeps
/// its quotes and its leading zeros.
fn format_id(id: &str) -> String {
    match id.parse::<i64>() {
        Ok(value) if value.to_string() == id => value.to_string(),
        _ => format!("'{}'", id.replace('\'', "''")),
    }
}
