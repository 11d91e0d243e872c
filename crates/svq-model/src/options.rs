use std::collections::BTreeSet;

/// Immutable configuration for one screening run.
///
/// Everything the detectors match against by name or phrase lives here, so a
/// study in another locale (different non-answer vocabulary, different export
/// column names) is a configuration change, not a code change. The defaults
/// reproduce the Czech panel deployment this tool was built for.
#[derive(Debug, Clone)]
pub struct ScreeningOptions {
    /// Explicit non-answer phrases, lowercase, matched after trailing
    /// punctuation is stripped ("nevím", "nic", "n/a", "...").
    pub non_answer_phrases: BTreeSet<String>,
    /// Letters counted as alphabetic content by the gibberish check.
    pub alphabet: String,
    /// Vowels (accented variants included) for the consonant-ratio check.
    pub vowels: String,
    /// ID column candidates, tried in order.
    pub id_candidates: Vec<String>,
    /// Columns never considered as ID despite an "id" in their name.
    pub id_exclude: Vec<String>,
    /// Export bookkeeping columns excluded from open-ended discovery.
    pub system_columns: BTreeSet<String>,
    /// Column-name prefixes excluded from open-ended discovery.
    pub excluded_column_prefixes: Vec<String>,
    /// Column-name suffixes excluded from open-ended discovery
    /// ("other, please specify" text fields).
    pub excluded_column_suffixes: Vec<String>,
    /// Completion-duration column candidates, tried in order.
    pub duration_columns: Vec<String>,
    /// Speeder cutoff = median duration / this divisor.
    pub speeder_divisor: f64,
    /// Minimum columns for a battery group, and minimum non-missing values a
    /// respondent must have in the group for a straight line to count.
    pub min_battery_items: usize,
    /// Distinct straight-lined batteries required to flag a respondent.
    pub min_corroborating_batteries: usize,
    /// Adjusted score at or below this is high risk.
    pub high_risk_threshold: f64,
    /// Adjusted score at or below this (above high) is medium risk.
    pub medium_risk_threshold: f64,
    /// Minimum average answer length for the heuristic open-column fallback.
    pub min_open_text_len: f64,
    /// Optional tier policy: when set and the longest battery is shorter than
    /// this, a straight-lining-only respondent is downgraded to low risk.
    pub battery_length_tier_min: Option<usize>,
}

impl Default for ScreeningOptions {
    fn default() -> Self {
        let non_answer_phrases = [
            "nevím",
            "nevim",
            "nwm",
            "nic",
            "xxx",
            "nee",
            "ne",
            "ok",
            "oká",
            "žádné",
            "zadne",
            "žádný",
            "zadny",
            "nebim",
            "nic mě nenapadá",
            "nic moc",
            "nemám",
            "nemam",
            "bez názoru",
            "bez komentáře",
            "hmm",
            "hm",
            "hmmm",
            "hm...",
            "fajn",
            ".",
            "..",
            "...",
            "-",
            "--",
            "no",
            "noo",
            "jo",
            "jj",
            "nn",
            "idk",
            "n/a",
            "nic mne nenapada",
            "nic me nenapada",
            "bez komentare",
            "nic zvláštního",
            "nic zvlastniho",
            "nic extra",
            "nevím co napsat",
            "nevim co napsat",
        ];
        Self {
            non_answer_phrases: non_answer_phrases.iter().map(|s| (*s).to_string()).collect(),
            alphabet: "abcdefghijklmnopqrstuvwxyzáčďéěíňóřšťúůýž".to_string(),
            vowels: "aeiouyáéíóúůýě".to_string(),
            id_candidates: [
                "ExternalId",
                "UserPanelId",
                "QuestionaryUserId",
                "email",
                "ReferralCode",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            id_exclude: vec!["RespondentFinishedOnQuestion".to_string()],
            system_columns: [
                "start",
                "end",
                "duration",
                "RespondentFinishedOnQuestion",
                "ExternalId",
                "ReferralCode",
                "QuestionaryUserId",
                "email",
                "UserPanelId",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            excluded_column_prefixes: vec!["User".to_string()],
            excluded_column_suffixes: vec!["_jina".to_string()],
            duration_columns: ["duration", "interview_length"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            speeder_divisor: 3.0,
            min_battery_items: 4,
            min_corroborating_batteries: 2,
            high_risk_threshold: 0.2,
            medium_risk_threshold: 0.35,
            min_open_text_len: 3.0,
            battery_length_tier_min: None,
        }
    }
}

impl ScreeningOptions {
    /// True when the phrase (already lowercased and stripped of trailing
    /// punctuation) is a known non-answer.
    pub fn is_non_answer(&self, phrase: &str) -> bool {
        self.non_answer_phrases.contains(phrase)
    }

    pub fn is_vowel(&self, ch: char) -> bool {
        self.vowels.contains(ch)
    }

    pub fn is_alphabet_letter(&self, ch: char) -> bool {
        self.alphabet.contains(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dictionary_contains_core_phrases() {
        let options = ScreeningOptions::default();
        assert!(options.is_non_answer("nevím"));
        assert!(options.is_non_answer("..."));
        assert!(options.is_non_answer("ok"));
        assert!(!options.is_non_answer("auto"));
    }

    #[test]
    fn accented_vowels_are_recognized() {
        let options = ScreeningOptions::default();
        assert!(options.is_vowel('á'));
        assert!(options.is_vowel('ě'));
        assert!(!options.is_vowel('ř'));
    }
}
