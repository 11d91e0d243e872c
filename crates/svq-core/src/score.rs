//! Open-ended answer quality scoring.
//!
//! Scores a single free-text answer on a 0..1 scale with an ordered rule
//! cascade: hard junk patterns first (filler, repeated characters,
//! keyboard-mash gibberish), then the explicit non-answer dictionary, then a
//! word-count ladder. Scoring is length-driven by design; a short but valid
//! answer can land in the medium band, which is why the classifier treats
//! that band as "review", not "delete".

use svq_model::ScreeningOptions;

/// Score for filler and gibberish answers.
const JUNK_SCORE: f64 = 0.05;
/// Score for explicit non-answer phrases ("nevím", "nic", "n/a").
const NON_ANSWER_SCORE: f64 = 0.1;

/// Word-count ladder: (maximum word count, score). Checked in order; answers
/// longer than the last tier grow from `LONG_ANSWER_BASE` per extra word.
const WORD_TIERS: &[(usize, f64)] = &[(1, 0.2), (2, 0.3), (4, 0.45), (8, 0.65), (15, 0.8)];
const LONG_ANSWER_BASE: f64 = 0.85;
const LONG_ANSWER_STEP: f64 = 0.01;
const LONG_ANSWER_TIER_WORDS: usize = 15;

/// Identical-character run length treated as filler.
const MAX_CHAR_RUN: usize = 10;
/// Run length of the letter `x` treated as filler ("xxxxx").
const MAX_X_RUN: usize = 5;
/// Minimum alphabetic length before the consonant-ratio check applies.
const GIBBERISH_MIN_LETTERS: usize = 8;
/// Consonant share above which alphabetic content is considered mashed.
const GIBBERISH_CONSONANT_RATIO: f64 = 0.85;

/// Scores open-text answers against the configured dictionaries.
#[derive(Debug, Clone, Copy)]
pub struct AnswerQualityScorer<'a> {
    options: &'a ScreeningOptions,
}

impl<'a> AnswerQualityScorer<'a> {
    pub fn new(options: &'a ScreeningOptions) -> Self {
        Self { options }
    }

    /// Score one answer in [0.0, 1.0]. Deterministic, pure function of the
    /// text and the configured dictionaries.
    pub fn score(&self, text: &str) -> f64 {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        let lower = trimmed.to_lowercase();

        if is_filler(trimmed) || has_repeated_run(trimmed, &lower) {
            return JUNK_SCORE;
        }
        if self.is_gibberish(&lower) {
            return JUNK_SCORE;
        }

        let phrase = lower.trim_end_matches(['.', ',', '!', '?', ' ']);
        // The dictionary holds bare punctuation entries ("...", "-"), which
        // the strip above reduces to nothing; match those on the raw form.
        if self.options.is_non_answer(phrase) || self.options.is_non_answer(&lower) {
            return NON_ANSWER_SCORE;
        }

        let word_count = trimmed.split_whitespace().count();
        for (max_words, score) in WORD_TIERS {
            if word_count <= *max_words {
                return *score;
            }
        }
        let extra = (word_count - LONG_ANSWER_TIER_WORDS) as f64;
        (LONG_ANSWER_BASE + LONG_ANSWER_STEP * extra).min(1.0)
    }

    /// Alphabetic-only content longer than 8 letters that is almost entirely
    /// consonants reads as keyboard mash ("asdfghjkl"). The vowel set carries
    /// accented vowels so diacritic-heavy languages are not penalized.
    fn is_gibberish(&self, lower: &str) -> bool {
        let letters: Vec<char> = lower
            .chars()
            .filter(|ch| self.options.is_alphabet_letter(*ch))
            .collect();
        if letters.len() <= GIBBERISH_MIN_LETTERS {
            return false;
        }
        let consonants = letters
            .iter()
            .filter(|ch| !self.options.is_vowel(**ch))
            .count();
        consonants as f64 / letters.len() as f64 > GIBBERISH_CONSONANT_RATIO
    }
}

/// An answer whose non-punctuation content is under two characters while the
/// raw text is longer than three ("....", "- - -") is filler.
fn is_filler(text: &str) -> bool {
    let content = text
        .chars()
        .filter(|ch| !matches!(ch, '.' | '-' | '_' | '!' | '?' | ',') && !ch.is_whitespace())
        .count();
    content < 2 && text.chars().count() > 3
}

fn has_repeated_run(text: &str, lower: &str) -> bool {
    longest_identical_run(text) >= MAX_CHAR_RUN || longest_char_run(lower, 'x') >= MAX_X_RUN
}

fn longest_identical_run(text: &str) -> usize {
    let mut longest = 0usize;
    let mut current = 0usize;
    let mut previous: Option<char> = None;
    for ch in text.chars() {
        if Some(ch) == previous {
            current += 1;
        } else {
            current = 1;
            previous = Some(ch);
        }
        longest = longest.max(current);
    }
    longest
}

fn longest_char_run(text: &str, target: char) -> usize {
    let mut longest = 0usize;
    let mut current = 0usize;
    for ch in text.chars() {
        if ch == target {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer_options() -> ScreeningOptions {
        ScreeningOptions::default()
    }

    #[test]
    fn empty_and_blank_score_zero() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   "), 0.0);
    }

    #[test]
    fn filler_characters_score_low() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        assert_eq!(scorer.score("....."), JUNK_SCORE);
        assert_eq!(scorer.score("- - - -"), JUNK_SCORE);
    }

    #[test]
    fn repeated_runs_score_low() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        assert_eq!(scorer.score("aaaaaaaaaa"), JUNK_SCORE);
        assert_eq!(scorer.score("xxxxx"), JUNK_SCORE);
        assert_eq!(scorer.score("__________"), JUNK_SCORE);
    }

    #[test]
    fn consonant_mash_scores_low() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        assert_eq!(scorer.score("qwrtzpsdfghjkl"), JUNK_SCORE);
        // Real words keep a healthy vowel share.
        assert!(scorer.score("spokojenost") > JUNK_SCORE);
    }

    #[test]
    fn non_answers_match_case_insensitively_with_trailing_punctuation() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        assert_eq!(scorer.score("nevím"), NON_ANSWER_SCORE);
        assert_eq!(scorer.score("Nevím."), NON_ANSWER_SCORE);
        assert_eq!(scorer.score("NIC"), NON_ANSWER_SCORE);
        assert_eq!(scorer.score("ok"), NON_ANSWER_SCORE);
        assert_eq!(scorer.score("..."), NON_ANSWER_SCORE);
    }

    #[test]
    fn word_count_ladder() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        assert_eq!(scorer.score("auto"), 0.2);
        assert_eq!(scorer.score("dobrý produkt"), 0.3);
        assert_eq!(scorer.score("je to dobré"), 0.45);
        assert_eq!(scorer.score("Je to velmi dobrý produkt"), 0.65);
        assert_eq!(
            scorer.score("líbí se mi šíře sortimentu a ochota personálu na prodejně"),
            0.8
        );
    }

    #[test]
    fn long_answers_grow_toward_one() {
        let options = scorer_options();
        let scorer = AnswerQualityScorer::new(&options);
        let twenty_words = (0..20).map(|i| format!("slovo{i}")).collect::<Vec<_>>();
        let text = twenty_words.join(" ");
        assert!((scorer.score(&text) - 0.9).abs() < 1e-9);

        let fifty_words = (0..50).map(|i| format!("slovo{i}")).collect::<Vec<_>>();
        assert_eq!(scorer.score(&fifty_words.join(" ")), 1.0);
    }
}
