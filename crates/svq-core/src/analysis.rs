//! The screening engine: runs every detector over one dataset and fuses the
//! signals into risk groups and exclusion recommendations.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use svq_ingest::{cell_str, is_missing_cell};
use svq_model::{
    OpenEndedRisk, QuestionDescriptor, RecommendationTier, RiskGroup, ScoreRecord,
    ScreeningOptions, ScreeningResult,
};

use crate::columns::{find_id_column, respondent_ids};
use crate::open_ended::{classify, open_text_columns};
use crate::score::AnswerQualityScorer;
use crate::similarity::similarity_penalty;
use crate::speeder::detect_speeders;
use crate::straightline::{detect_straight_liners, discover_battery_groups};

/// One configured screening engine. Construct once, run over any number of
/// datasets; every run is an independent batch pass with no shared state.
#[derive(Debug, Clone, Default)]
pub struct ScreeningEngine {
    options: ScreeningOptions,
}

impl ScreeningEngine {
    pub fn new(options: ScreeningOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScreeningOptions {
        &self.options
    }

    /// Run the full screening pass.
    ///
    /// `descriptors` is the questionnaire structure when available; without
    /// it every detector falls back to its heuristic column discovery.
    /// Detector-level degradation (missing timing data, unmatched questions)
    /// lands in `ScreeningResult::warnings`, never aborts the run.
    pub fn analyze(
        &self,
        df: &DataFrame,
        descriptors: Option<&[QuestionDescriptor]>,
    ) -> ScreeningResult {
        let mut result = ScreeningResult {
            total_respondents: df.height(),
            ..ScreeningResult::default()
        };

        result.id_column = find_id_column(df, &self.options);
        let ids = respondent_ids(df, &result.id_column);
        info!(
            respondents = result.total_respondents,
            id_column = %result.id_column,
            "screening run started"
        );

        // Speeders.
        let speeder_outcome = detect_speeders(df, &ids, &self.options);
        result.speeders = speeder_outcome.speeders;
        result.speeder_threshold = speeder_outcome.threshold;
        result.warnings.extend(speeder_outcome.warnings);

        // Open-ended quality.
        self.score_open_ended(df, descriptors, &ids, &mut result);

        // Straight-lining.
        let groups =
            discover_battery_groups(df, descriptors, &self.options, &mut result.warnings);
        let straight_outcome = detect_straight_liners(df, &ids, &groups, &self.options);
        result.straight_liners = straight_outcome.straight_liners;
        result.battery_length = straight_outcome.battery_length;
        result.warnings.extend(straight_outcome.warnings);

        self.aggregate(&mut result);
        info!(
            flagged = result.flagged_count(),
            high_risk = result.recommendations.high_risk.len(),
            medium_risk = result.recommendations.medium_risk.len(),
            "screening run complete"
        );
        result
    }

    fn score_open_ended(
        &self,
        df: &DataFrame,
        descriptors: Option<&[QuestionDescriptor]>,
        ids: &[String],
        result: &mut ScreeningResult,
    ) {
        let columns = open_text_columns(df, descriptors, &self.options, &mut result.warnings);
        if columns.is_empty() {
            let message = "no open-ended columns found".to_string();
            info!("{message}");
            result.warnings.push(message);
            return;
        }
        let series: Vec<_> = columns
            .iter()
            .filter_map(|column| df.column(column).ok())
            .collect();
        let scorer = AnswerQualityScorer::new(&self.options);

        for (idx, id) in ids.iter().enumerate() {
            let mut answers = Vec::new();
            let mut scores = Vec::new();
            for column in &series {
                let value = column.get(idx).unwrap_or(AnyValue::Null);
                if is_missing_cell(&value) {
                    continue;
                }
                let answer = cell_str(value).trim().to_string();
                scores.push(scorer.score(&answer));
                answers.push(answer);
            }
            if scores.is_empty() {
                continue;
            }

            let penalty = similarity_penalty(&answers);
            let avg = scores.iter().sum::<f64>() / scores.len() as f64;
            result.score_records.insert(
                id.clone(),
                ScoreRecord {
                    individual_scores: scores.clone(),
                    avg_score: avg,
                    similarity_penalty: penalty,
                    adjusted_score: avg - penalty,
                    answers,
                },
            );

            match classify(&scores, penalty, &self.options) {
                OpenEndedRisk::HighRisk => result.open_high.push(id.clone()),
                OpenEndedRisk::MediumRisk => result.open_medium.push(id.clone()),
                OpenEndedRisk::Ok => {}
            }
        }
        info!(
            columns = columns.len(),
            high_risk = result.open_high.len(),
            medium_risk = result.open_medium.len(),
            "open-ended scoring complete"
        );
    }

    /// Fuse the three signals into risk groups and recommendation tiers.
    fn aggregate(&self, result: &mut ScreeningResult) {
        let speeders: BTreeSet<&str> = result.speeders.iter().map(String::as_str).collect();
        let open_high: BTreeSet<&str> = result.open_high.iter().map(String::as_str).collect();
        let open_all: BTreeSet<&str> = open_high
            .iter()
            .copied()
            .chain(result.open_medium.iter().map(String::as_str))
            .collect();
        let straight: BTreeSet<&str> =
            result.straight_liners.iter().map(String::as_str).collect();

        // Blank identifiers carry no actionable record and are dropped here
        // rather than inside each detector.
        let flagged: BTreeSet<&str> = speeders
            .iter()
            .chain(open_all.iter())
            .chain(straight.iter())
            .copied()
            .filter(|id| !id.is_empty())
            .collect();

        let mut risk_groups = std::mem::take(&mut result.risk_groups);
        let mut recommendations = std::mem::take(&mut result.recommendations);
        for id in &flagged {
            let is_speeder = speeders.contains(id);
            let is_open = open_all.contains(id);
            let is_straight = straight.contains(id);
            let Some(group) = RiskGroup::classify(is_speeder, is_open, is_straight) else {
                continue;
            };
            risk_groups.push(group, (*id).to_string());

            let tier = self.tier(
                is_speeder,
                is_open,
                is_straight,
                open_high.contains(id),
                result.battery_length,
            );
            recommendations.push(tier, (*id).to_string());
        }
        result.risk_groups = risk_groups;
        result.recommendations = recommendations;
        result.all_bad = flagged.iter().map(|id| (*id).to_string()).collect();
    }

    fn tier(
        &self,
        is_speeder: bool,
        is_open: bool,
        is_straight: bool,
        is_open_high: bool,
        battery_length: usize,
    ) -> RecommendationTier {
        let count =
            usize::from(is_speeder) + usize::from(is_open) + usize::from(is_straight);
        if count >= 2 || is_open_high {
            return RecommendationTier::High;
        }
        // Optional policy: a lone straight line over short grids is weak
        // evidence and drops to low.
        if let Some(min_length) = self.options.battery_length_tier_min
            && is_straight
            && !is_speeder
            && !is_open
            && battery_length < min_length
        {
            return RecommendationTier::Low;
        }
        RecommendationTier::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_produces_empty_result() {
        let df = svq_ingest::dataframe_from_columns(
            vec!["ExternalId".to_string(), "duration".to_string()],
            vec![vec![], vec![]],
        )
        .unwrap();
        let engine = ScreeningEngine::default();
        let result = engine.analyze(&df, None);
        assert_eq!(result.total_respondents, 0);
        assert!(result.all_bad.is_empty());
        assert!(result.risk_groups.total() == 0);
    }

    #[test]
    fn tier_policy_downgrades_lone_straight_liner_on_short_batteries() {
        let options = ScreeningOptions {
            battery_length_tier_min: Some(10),
            ..ScreeningOptions::default()
        };
        let engine = ScreeningEngine::new(options);
        let tier = engine.tier(false, false, true, false, 5);
        assert_eq!(tier, RecommendationTier::Low);
        // Long batteries keep the default medium tier.
        let tier = engine.tier(false, false, true, false, 12);
        assert_eq!(tier, RecommendationTier::Medium);
        // The policy never touches multi-signal respondents.
        let tier = engine.tier(true, false, true, false, 5);
        assert_eq!(tier, RecommendationTier::High);
    }

    #[test]
    fn open_high_guarantees_high_tier() {
        let engine = ScreeningEngine::default();
        assert_eq!(
            engine.tier(false, true, false, true, 0),
            RecommendationTier::High
        );
        assert_eq!(
            engine.tier(false, true, false, false, 0),
            RecommendationTier::Medium
        );
    }
}
