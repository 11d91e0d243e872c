use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScreenError;

/// How a question collects its answer. Drives which detector (if any)
/// considers the question's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Free-text answer, scored by the open-ended quality detector.
    OpenText,
    /// Matrix/grid of items on a shared rating scale, scanned for straight-lining.
    RatingBattery,
    /// One option from a fixed list.
    SingleChoice,
    /// Any number of options from a fixed list.
    MultiChoice,
    /// Anything else (info screens, terminators, quotas).
    Other,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::OpenText => "open-text",
            QuestionType::RatingBattery => "rating-battery",
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultiChoice => "multi-choice",
            QuestionType::Other => "other",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ScreenError;

    /// Parse a type label. Handles the hyphen/underscore/space variants that
    /// appear in exported questionnaire structures.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "OPEN" | "OPEN TEXT" | "TEXT" => Ok(QuestionType::OpenText),
            "BATTERY" | "RATING BATTERY" | "MATRIX" | "GRID" => Ok(QuestionType::RatingBattery),
            "SINGLE" | "SINGLE CHOICE" => Ok(QuestionType::SingleChoice),
            "MULTI" | "MULTI CHOICE" | "MULTIPLE CHOICE" => Ok(QuestionType::MultiChoice),
            "OTHER" => Ok(QuestionType::Other),
            _ => Err(ScreenError::Message(format!("Unknown question type: {}", s))),
        }
    }
}

/// One question as described by the questionnaire structure.
///
/// Questions gated behind an entry condition are excluded from detection:
/// their answers are not comparable across respondents because only a filtered
/// subset ever saw them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDescriptor {
    /// Short alphanumeric question code (e.g. "Q12", "Q6aB2").
    pub code: String,
    /// Question wording as shown to respondents.
    pub text: String,
    pub question_type: QuestionType,
    /// Ordered option/item labels; battery item labels for rating batteries.
    #[serde(default)]
    pub options: Vec<String>,
    /// True when the question sits behind skip logic.
    #[serde(default)]
    pub has_entry_condition: bool,
}

impl QuestionDescriptor {
    /// True when this question should feed a detector: open or battery typed
    /// and not gated behind skip logic.
    pub fn is_detectable(&self) -> bool {
        !self.has_entry_condition
            && matches!(
                self.question_type,
                QuestionType::OpenText | QuestionType::RatingBattery
            )
    }
}
