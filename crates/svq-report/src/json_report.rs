//! JSON screening report.
//!
//! Versioned machine-readable payload wrapping the full screening result, so
//! downstream tooling can consume a run without re-parsing the syntax file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use svq_model::ScreeningResult;

const REPORT_SCHEMA: &str = "svq.screening-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct ScreeningReportPayload {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: String,
    pub result: ScreeningResult,
}

impl ScreeningReportPayload {
    pub fn new(result: ScreeningResult) -> Self {
        Self {
            schema: REPORT_SCHEMA.to_string(),
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            result,
        }
    }
}

/// Write the screening report as pretty JSON into `output_dir`.
pub fn write_screening_report_json(
    output_dir: &Path,
    result: &ScreeningResult,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;
    let output_path = output_dir.join("screening_report.json");
    let payload = ScreeningReportPayload::new(result.clone());
    let json = serde_json::to_string_pretty(&payload).context("serialize screening report")?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips() {
        let result = ScreeningResult {
            total_respondents: 42,
            id_column: "ExternalId".to_string(),
            ..ScreeningResult::default()
        };
        let payload = ScreeningReportPayload::new(result);
        let json = serde_json::to_string(&payload).expect("serialize payload");
        let round: ScreeningReportPayload =
            serde_json::from_str(&json).expect("deserialize payload");
        assert_eq!(round.schema, REPORT_SCHEMA);
        assert_eq!(round.schema_version, REPORT_SCHEMA_VERSION);
        assert_eq!(round.result.total_respondents, 42);
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ScreeningResult::default();
        let path = write_screening_report_json(dir.path(), &result).unwrap();
        assert!(path.ends_with("screening_report.json"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"schema\": \"svq.screening-report\""));
        assert!(content.ends_with('\n'));
    }
}
