//! Questionnaire structure parsing.
//!
//! Scripting tools export the questionnaire as a flat text document: a code
//! line per question (`Q12. How satisfied ...`), followed by a type marker
//! line, rule lines for skip logic, and option bullets. This parser walks
//! that text once and emits a [`QuestionDescriptor`] per question.
//!
//! Binary document extraction is out of scope; callers hand over already
//! extracted plain text.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use svq_model::{QuestionDescriptor, QuestionType};

static QUESTION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<code>Q\d+[A-Za-z0-9]*)\.\s*(?P<text>.*)$").expect("question code pattern")
});

/// Marker phrases classifying questionnaire lines. Matched case-insensitively
/// as substrings; the defaults cover the Czech scripting-tool vocabulary the
/// tool was built against, other locales swap in their own set.
#[derive(Debug, Clone)]
pub struct QuestionnaireMarkers {
    pub open: Vec<String>,
    pub battery: Vec<String>,
    pub single: Vec<String>,
    pub multi: Vec<String>,
    /// Lines indicating the question sits behind skip logic.
    pub entry_condition: Vec<String>,
    /// Settings lines that must not be collected as option labels.
    pub settings: Vec<String>,
}

impl Default for QuestionnaireMarkers {
    fn default() -> Self {
        Self {
            open: vec![
                "OTEVŘENÁ OTÁZKA".to_string(),
                "ODPOVĚĎ TEXT".to_string(),
                "OTEVŘENÁ".to_string(),
            ],
            battery: vec!["BATERIE OTÁZEK".to_string(), "BATERIE".to_string()],
            single: vec!["JEDNA MOŽNÁ ODPOVĚĎ".to_string()],
            multi: vec!["VÍCE MOŽNÝCH ODPOVĚDÍ".to_string()],
            entry_condition: vec![
                "PRAVIDLA".to_string(),
                "ISCHECKED".to_string(),
                "THEN EXIT".to_string(),
            ],
            settings: vec![
                "NASTAVENÍ OTÁZKY".to_string(),
                "POVINNÁ".to_string(),
                "DÉLKA TEXTU".to_string(),
                "MIN.".to_string(),
                "MAX.".to_string(),
                "ZVOLENÝCH".to_string(),
            ],
        }
    }
}

impl QuestionnaireMarkers {
    fn matches_any(markers: &[String], line_upper: &str) -> bool {
        markers
            .iter()
            .any(|marker| line_upper.contains(marker.as_str()))
    }

    fn classify_type(&self, line_upper: &str) -> Option<QuestionType> {
        // Battery markers first: a battery line also mentions the per-item
        // answer mode ("BATERIE OTÁZEK - JEDNA MOŽNÁ ODPOVĚĎ").
        if Self::matches_any(&self.battery, line_upper) {
            return Some(QuestionType::RatingBattery);
        }
        if Self::matches_any(&self.open, line_upper) {
            return Some(QuestionType::OpenText);
        }
        if Self::matches_any(&self.multi, line_upper) {
            return Some(QuestionType::MultiChoice);
        }
        if Self::matches_any(&self.single, line_upper) {
            return Some(QuestionType::SingleChoice);
        }
        None
    }

    fn is_entry_condition(&self, line_upper: &str) -> bool {
        Self::matches_any(&self.entry_condition, line_upper)
    }

    fn is_marker_line(&self, line_upper: &str) -> bool {
        self.classify_type(line_upper).is_some()
            || Self::matches_any(&self.settings, line_upper)
            || self.is_entry_condition(line_upper)
    }
}

struct PendingQuestion {
    code: String,
    text: String,
    question_type: Option<QuestionType>,
    options: Vec<String>,
    has_entry_condition: bool,
}

impl PendingQuestion {
    fn finish(self) -> QuestionDescriptor {
        QuestionDescriptor {
            code: self.code,
            text: self.text,
            question_type: self.question_type.unwrap_or(QuestionType::Other),
            options: self.options,
            has_entry_condition: self.has_entry_condition,
        }
    }
}

/// Parse questionnaire text into question descriptors, in document order.
pub fn parse_questionnaire(text: &str, markers: &QuestionnaireMarkers) -> Vec<QuestionDescriptor> {
    let mut questions = Vec::new();
    let mut current: Option<PendingQuestion> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(captures) = QUESTION_CODE.captures(line) {
            if let Some(pending) = current.take() {
                questions.push(pending.finish());
            }
            current = Some(PendingQuestion {
                code: captures["code"].to_string(),
                text: captures["text"].trim().to_string(),
                question_type: None,
                options: Vec::new(),
                has_entry_condition: false,
            });
            continue;
        }

        let Some(pending) = current.as_mut() else {
            continue;
        };
        let line_upper = line.to_uppercase();

        if let Some(question_type) = markers.classify_type(&line_upper) {
            pending.question_type = Some(question_type);
        }
        if markers.is_entry_condition(&line_upper) {
            pending.has_entry_condition = true;
        }

        if let Some(option) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
            let option = option.trim_start_matches(['-', '•']).trim();
            if !option.is_empty() && !markers.is_marker_line(&option.to_uppercase()) {
                pending.options.push(option.to_string());
            }
        }
    }
    if let Some(pending) = current.take() {
        questions.push(pending.finish());
    }

    let open = questions
        .iter()
        .filter(|q| q.question_type == QuestionType::OpenText && !q.has_entry_condition)
        .count();
    let batteries = questions
        .iter()
        .filter(|q| q.question_type == QuestionType::RatingBattery && !q.has_entry_condition)
        .count();
    info!(
        total = questions.len(),
        open_questions = open,
        batteries,
        "parsed questionnaire structure"
    );

    questions
}

/// Read and parse a questionnaire text file.
pub fn parse_questionnaire_file(
    path: &Path,
    markers: &QuestionnaireMarkers,
) -> Result<Vec<QuestionDescriptor>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read questionnaire {}", path.display()))?;
    Ok(parse_questionnaire(&text, markers))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Q1. Jak jste celkově spokojen/a?
Vyberte typ otázky:: BATERIE OTÁZEK - JEDNA MOŽNÁ ODPOVĚĎ
- Kvalita výrobků
- Šíře sortimentu
- Ceny
- Ochota personálu
- Otevírací doba

Q2. Co byste na našich službách zlepšil/a?
Vyberte typ otázky:: OTEVŘENÁ OTÁZKA - ODPOVĚĎ TEXT
Nastavení otázky: Povinná

Q3. Proč jste zvolil/a tuto odpověď?
Vyberte typ otázky:: OTEVŘENÁ OTÁZKA - ODPOVĚĎ TEXT
Pravidla: IF (Q2 ISCHECKED 1) THEN EXIT
";

    #[test]
    fn parses_codes_types_and_options() {
        let questions = parse_questionnaire(SAMPLE, &QuestionnaireMarkers::default());
        assert_eq!(questions.len(), 3);

        assert_eq!(questions[0].code, "Q1");
        assert_eq!(questions[0].question_type, QuestionType::RatingBattery);
        assert_eq!(questions[0].options.len(), 5);
        assert!(!questions[0].has_entry_condition);

        assert_eq!(questions[1].code, "Q2");
        assert_eq!(questions[1].question_type, QuestionType::OpenText);
        assert!(questions[1].is_detectable());
    }

    #[test]
    fn gated_question_carries_entry_condition() {
        let questions = parse_questionnaire(SAMPLE, &QuestionnaireMarkers::default());
        assert!(questions[2].has_entry_condition);
        assert!(!questions[2].is_detectable());
    }

    #[test]
    fn question_text_is_captured() {
        let questions = parse_questionnaire(SAMPLE, &QuestionnaireMarkers::default());
        assert_eq!(questions[1].text, "Co byste na našich službách zlepšil/a?");
    }

    #[test]
    fn empty_text_yields_no_questions() {
        let questions = parse_questionnaire("", &QuestionnaireMarkers::default());
        assert!(questions.is_empty());
    }

    #[test]
    fn unknown_type_defaults_to_other() {
        let text = "Q9. Děkujeme za vyplnění.\nPOUZE TEXT\n";
        let questions = parse_questionnaire(text, &QuestionnaireMarkers::default());
        assert_eq!(questions[0].question_type, QuestionType::Other);
    }
}
