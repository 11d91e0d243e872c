pub mod battery;
pub mod error;
pub mod lookup;
pub mod options;
pub mod question;
pub mod screening;

pub use battery::BatteryGroup;
pub use error::{Result, ScreenError};
pub use lookup::CaseInsensitiveSet;
pub use options::ScreeningOptions;
pub use question::{QuestionDescriptor, QuestionType};
pub use screening::{
    OpenEndedRisk, RecommendationTier, Recommendations, RiskGroup, RiskGroups, ScoreRecord,
    ScreeningResult, SpeederThreshold,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes() {
        let mut result = ScreeningResult {
            total_respondents: 3,
            id_column: "ExternalId".to_string(),
            ..ScreeningResult::default()
        };
        result.speeders.push("r1".to_string());
        result.all_bad.push("r1".to_string());
        result
            .risk_groups
            .push(RiskGroup::SpeedersOnly, "r1".to_string());
        result
            .recommendations
            .push(RecommendationTier::Medium, "r1".to_string());

        let json = serde_json::to_string(&result).expect("serialize result");
        let round: ScreeningResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
    }

    #[test]
    fn score_record_round_trips() {
        let record = ScoreRecord {
            individual_scores: vec![0.2, 0.65],
            avg_score: 0.425,
            similarity_penalty: 0.0,
            adjusted_score: 0.425,
            answers: vec!["auto".to_string(), "je to velmi dobrý produkt".to_string()],
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: ScoreRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }
}
