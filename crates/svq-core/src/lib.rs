//! Respondent quality scoring engine.
//!
//! Four independent detectors over one tabular dataset — open-ended answer
//! quality, cross-answer similarity, speeders, straight-lining — fused by a
//! risk aggregator into per-respondent exclusion recommendations. One call to
//! [`ScreeningEngine::analyze`] is one complete batch pass; nothing is kept
//! between runs.

pub mod analysis;
pub mod columns;
pub mod duration;
pub mod open_ended;
pub mod score;
pub mod similarity;
pub mod speeder;
pub mod straightline;

pub use analysis::ScreeningEngine;
pub use columns::{find_id_column, find_matching_columns, respondent_ids};
pub use duration::parse_duration_seconds;
pub use open_ended::{classify, open_text_columns};
pub use score::AnswerQualityScorer;
pub use similarity::similarity_penalty;
pub use speeder::{SpeederOutcome, detect_speeders};
pub use straightline::{StraightLineOutcome, detect_straight_liners, discover_battery_groups};
