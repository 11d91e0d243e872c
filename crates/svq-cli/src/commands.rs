use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use svq_core::ScreeningEngine;
use svq_ingest::{QuestionnaireMarkers, parse_questionnaire_file, read_survey_csv};
use svq_model::{ScreeningOptions, ScreeningResult};
use svq_report::{SyntaxOptions, write_exclusion_syntax, write_screening_report_json};

use crate::cli::AnalyzeArgs;

/// Everything the summary needs after one analyze run.
pub struct AnalyzeOutput {
    pub result: ScreeningResult,
    pub syntax_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeOutput> {
    let span = info_span!("analyze", data = %args.data_file.display());
    let _guard = span.enter();

    // =========================================================================
    // Stage 1: Ingest - data file, optional questionnaire structure
    // =========================================================================
    let df = read_survey_csv(&args.data_file)?;
    info!(
        respondents = df.height(),
        variables = df.width(),
        "dataset loaded"
    );

    let descriptors = match &args.questionnaire {
        Some(path) => {
            let questions = parse_questionnaire_file(path, &QuestionnaireMarkers::default())?;
            Some(questions)
        }
        None => None,
    };

    // =========================================================================
    // Stage 2: Screening
    // =========================================================================
    let options = ScreeningOptions {
        battery_length_tier_min: args.battery_tier_min,
        ..ScreeningOptions::default()
    };
    let engine = ScreeningEngine::new(options);
    let result = engine.analyze(&df, descriptors.as_deref());

    // =========================================================================
    // Stage 3: Outputs
    // =========================================================================
    let output_dir = resolve_output_dir(args);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let syntax_file = if args.no_syntax {
        None
    } else {
        let path = output_dir.join("delete_bad_respondents.sps");
        write_exclusion_syntax(&path, &result, &SyntaxOptions::default())?;
        info!(path = %path.display(), "exclusion syntax written");
        Some(path)
    };
    let report_file = if args.no_json {
        None
    } else {
        let path = write_screening_report_json(&output_dir, &result)?;
        info!(path = %path.display(), "screening report written");
        Some(path)
    };

    Ok(AnalyzeOutput {
        result,
        syntax_file,
        report_file,
    })
}

fn resolve_output_dir(args: &AnalyzeArgs) -> PathBuf {
    args.output_dir.clone().unwrap_or_else(|| {
        args.data_file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AnalyzeArgs;

    fn args(data: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            data_file: data.to_path_buf(),
            questionnaire: None,
            output_dir: None,
            no_syntax: false,
            no_json: false,
            battery_tier_min: None,
        }
    }

    #[test]
    fn analyze_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("export.csv");
        std::fs::write(
            &data,
            "ExternalId,duration,QA5\n\
             r1,20,nev\u{ed}m\n\
             r2,600,Je to velmi dobr\u{fd} produkt\n\
             r3,540,Kvalita odpov\u{ed}d\u{e1} cen\u{011b}\n",
        )
        .unwrap();

        let output = run_analyze(&args(&data)).unwrap();
        assert_eq!(output.result.total_respondents, 3);
        let syntax = output.syntax_file.expect("syntax written");
        assert!(syntax.exists());
        let report = output.report_file.expect("report written");
        assert!(report.exists());
    }

    #[test]
    fn missing_data_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("missing.csv");
        assert!(run_analyze(&args(&data)).is_err());
    }
}
