//! Cross-answer similarity penalty.
//!
//! A respondent pasting the same text into every open question scores well on
//! length alone. This module compares a respondent's answers with each other
//! and returns a penalty subtracted from their average quality score:
//! outright duplication hits the cap, looser near-duplication (normalized
//! edit distance) earns a graded penalty.

use std::collections::BTreeMap;

/// Penalty cap: every answer identical.
const IDENTICAL_PENALTY: f64 = 0.15;
/// Almost-all-identical (at most two distinct values, modal value three
/// or more times among four or more answers).
const MOSTLY_IDENTICAL_PENALTY: f64 = 0.12;
const NEAR_DUPLICATE_PENALTY: f64 = 0.12;
const SIMILAR_PENALTY: f64 = 0.08;
const LOOSE_SIMILARITY_PENALTY: f64 = 0.04;

/// Pairwise ratio above this counts as a "high similarity" pair.
const HIGH_PAIR_RATIO: f64 = 0.7;

/// Penalty in [0.0, 0.15] for suspicious repetition across a respondent's
/// open-ended answers. Answers are lowercased and trimmed before comparison;
/// blank answers are ignored.
pub fn similarity_penalty(answers: &[String]) -> f64 {
    let clean: Vec<String> = answers
        .iter()
        .map(|answer| answer.trim().to_lowercase())
        .filter(|answer| !answer.is_empty())
        .collect();
    if clean.len() < 2 {
        return 0.0;
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for answer in &clean {
        *counts.entry(answer.as_str()).or_insert(0) += 1;
    }

    if counts.len() == 1 && clean.len() >= 3 {
        return IDENTICAL_PENALTY;
    }
    if counts.len() <= 2 && clean.len() >= 4 {
        let modal = counts.values().copied().max().unwrap_or(0);
        if modal >= 3 {
            return MOSTLY_IDENTICAL_PENALTY;
        }
    }

    let mut ratios = Vec::new();
    for i in 0..clean.len() {
        for j in (i + 1)..clean.len() {
            ratios.push(strsim::normalized_levenshtein(&clean[i], &clean[j]));
        }
    }
    let avg = ratios.iter().sum::<f64>() / ratios.len() as f64;
    let high_pairs = ratios.iter().filter(|ratio| **ratio > HIGH_PAIR_RATIO).count();

    if avg > 0.8 {
        NEAR_DUPLICATE_PENALTY
    } else if avg > 0.6 || high_pairs * 2 >= ratios.len() {
        SIMILAR_PENALTY
    } else if avg > 0.4 {
        LOOSE_SIMILARITY_PENALTY
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn fewer_than_two_answers_is_free() {
        assert_eq!(similarity_penalty(&answers(&[])), 0.0);
        assert_eq!(similarity_penalty(&answers(&["abc"])), 0.0);
        assert_eq!(similarity_penalty(&answers(&["abc", "  "])), 0.0);
    }

    #[test]
    fn all_identical_hits_the_cap() {
        assert_eq!(
            similarity_penalty(&answers(&["abc", "abc", "abc"])),
            IDENTICAL_PENALTY
        );
        // Case and surrounding whitespace do not break the match.
        assert_eq!(
            similarity_penalty(&answers(&["Abc ", "abc", " ABC"])),
            IDENTICAL_PENALTY
        );
    }

    #[test]
    fn two_identical_answers_are_not_enough_for_the_cap() {
        let penalty = similarity_penalty(&answers(&["abc", "abc"]));
        assert!(penalty < IDENTICAL_PENALTY);
    }

    #[test]
    fn mostly_identical_earns_the_second_tier() {
        assert_eq!(
            similarity_penalty(&answers(&["dobré", "dobré", "dobré", "špatné"])),
            MOSTLY_IDENTICAL_PENALTY
        );
    }

    #[test]
    fn unrelated_answers_are_free() {
        let penalty = similarity_penalty(&answers(&[
            "kvalita výrobků je vynikající",
            "otevírací doba nevyhovuje",
            "1500",
        ]));
        assert_eq!(penalty, 0.0);
    }

    #[test]
    fn near_duplicates_earn_a_graded_penalty() {
        let penalty = similarity_penalty(&answers(&[
            "dobra kvalita produktu",
            "dobra kvalita produktu!",
        ]));
        assert_eq!(penalty, NEAR_DUPLICATE_PENALTY);
    }

    #[test]
    fn penalty_never_exceeds_the_cap() {
        let sets: [&[&str]; 4] = [
            &["a", "a", "a", "a", "a"],
            &["abc", "abd", "abe", "abf"],
            &["x", "y"],
            &["stejné", "stejné", "jiné", "stejné"],
        ];
        for set in sets {
            let penalty = similarity_penalty(&answers(set));
            assert!((0.0..=IDENTICAL_PENALTY).contains(&penalty));
        }
    }
}
