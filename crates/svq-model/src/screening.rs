use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-respondent open-ended quality classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenEndedRisk {
    HighRisk,
    MediumRisk,
    Ok,
}

/// Audit trail for one respondent's open-ended answers. Kept on the result so
/// a reviewer can see why a respondent was (or was not) flagged, not just the
/// final label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Quality score per answered open-ended column, in column order.
    pub individual_scores: Vec<f64>,
    pub avg_score: f64,
    /// Cross-answer similarity penalty subtracted from the average.
    pub similarity_penalty: f64,
    pub adjusted_score: f64,
    /// The answers the scores were computed from.
    pub answers: Vec<String>,
}

/// The seven combinatorial buckets over (speeder, bad open-ended,
/// straight-liner). The all-false combination never appears: a respondent
/// must carry at least one signal to be classified at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskGroup {
    AllThree,
    SpeedersOpen,
    SpeedersStraight,
    OpenStraight,
    SpeedersOnly,
    OpenOnly,
    StraightOnly,
}

impl RiskGroup {
    /// Classify a signal combination, `None` for all-false.
    pub fn classify(is_speeder: bool, is_open: bool, is_straight: bool) -> Option<RiskGroup> {
        match (is_speeder, is_open, is_straight) {
            (true, true, true) => Some(RiskGroup::AllThree),
            (true, true, false) => Some(RiskGroup::SpeedersOpen),
            (true, false, true) => Some(RiskGroup::SpeedersStraight),
            (false, true, true) => Some(RiskGroup::OpenStraight),
            (true, false, false) => Some(RiskGroup::SpeedersOnly),
            (false, true, false) => Some(RiskGroup::OpenOnly),
            (false, false, true) => Some(RiskGroup::StraightOnly),
            (false, false, false) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskGroup::AllThree => "all_three",
            RiskGroup::SpeedersOpen => "speeders_open",
            RiskGroup::SpeedersStraight => "speeders_straight",
            RiskGroup::OpenStraight => "open_straight",
            RiskGroup::SpeedersOnly => "speeders_only",
            RiskGroup::OpenOnly => "open_only",
            RiskGroup::StraightOnly => "straight_only",
        }
    }

    pub const ALL: [RiskGroup; 7] = [
        RiskGroup::AllThree,
        RiskGroup::SpeedersOpen,
        RiskGroup::SpeedersStraight,
        RiskGroup::OpenStraight,
        RiskGroup::SpeedersOnly,
        RiskGroup::OpenOnly,
        RiskGroup::StraightOnly,
    ];
}

/// Respondent ids per risk group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskGroups {
    pub all_three: Vec<String>,
    pub speeders_open: Vec<String>,
    pub speeders_straight: Vec<String>,
    pub open_straight: Vec<String>,
    pub speeders_only: Vec<String>,
    pub open_only: Vec<String>,
    pub straight_only: Vec<String>,
}

impl RiskGroups {
    pub fn push(&mut self, group: RiskGroup, id: String) {
        self.members_mut(group).push(id);
    }

    pub fn members(&self, group: RiskGroup) -> &[String] {
        match group {
            RiskGroup::AllThree => &self.all_three,
            RiskGroup::SpeedersOpen => &self.speeders_open,
            RiskGroup::SpeedersStraight => &self.speeders_straight,
            RiskGroup::OpenStraight => &self.open_straight,
            RiskGroup::SpeedersOnly => &self.speeders_only,
            RiskGroup::OpenOnly => &self.open_only,
            RiskGroup::StraightOnly => &self.straight_only,
        }
    }

    fn members_mut(&mut self, group: RiskGroup) -> &mut Vec<String> {
        match group {
            RiskGroup::AllThree => &mut self.all_three,
            RiskGroup::SpeedersOpen => &mut self.speeders_open,
            RiskGroup::SpeedersStraight => &mut self.speeders_straight,
            RiskGroup::OpenStraight => &mut self.open_straight,
            RiskGroup::SpeedersOnly => &mut self.speeders_only,
            RiskGroup::OpenOnly => &mut self.open_only,
            RiskGroup::StraightOnly => &mut self.straight_only,
        }
    }

    pub fn total(&self) -> usize {
        RiskGroup::ALL
            .iter()
            .map(|group| self.members(*group).len())
            .sum()
    }
}

/// Final exclusion recommendation for a flagged respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    High,
    Medium,
    Low,
}

/// Respondent ids per recommendation tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub high_risk: Vec<String>,
    pub medium_risk: Vec<String>,
    pub low_risk: Vec<String>,
}

impl Recommendations {
    pub fn push(&mut self, tier: RecommendationTier, id: String) {
        match tier {
            RecommendationTier::High => self.high_risk.push(id),
            RecommendationTier::Medium => self.medium_risk.push(id),
            RecommendationTier::Low => self.low_risk.push(id),
        }
    }
}

/// Speeder cutoff, kept in both units for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeederThreshold {
    pub seconds: f64,
    pub minutes: f64,
}

impl SpeederThreshold {
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            seconds,
            minutes: seconds / 60.0,
        }
    }
}

/// The complete output of one screening run. This is the sole handoff to
/// reporting and export-script generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub total_respondents: usize,
    /// Column the respondent identifiers were taken from.
    pub id_column: String,
    pub speeders: Vec<String>,
    /// `None` when the dataset carried no usable timing data.
    pub speeder_threshold: Option<SpeederThreshold>,
    pub open_high: Vec<String>,
    pub open_medium: Vec<String>,
    pub straight_liners: Vec<String>,
    /// Longest discovered battery, 0 when none were found.
    pub battery_length: usize,
    pub risk_groups: RiskGroups,
    pub recommendations: Recommendations,
    /// Union of all flagged respondents, deduplicated, blank ids discarded.
    pub all_bad: Vec<String>,
    /// Per-respondent open-ended scoring detail, keyed by canonical id.
    pub score_records: BTreeMap<String, ScoreRecord>,
    /// Non-fatal conditions hit during the run (missing timing data,
    /// unmatched questions, unparsable durations).
    pub warnings: Vec<String>,
}

impl ScreeningResult {
    pub fn flagged_count(&self) -> usize {
        self.all_bad.len()
    }

    pub fn open_flagged_count(&self) -> usize {
        self.open_high.len() + self.open_medium.len()
    }
}
