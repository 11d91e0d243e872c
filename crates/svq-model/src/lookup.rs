use std::collections::HashMap;

/// Case-insensitive column name lookup preserving the dataset's original
/// spelling. Survey exports are inconsistent about header casing
/// ("Duration" vs "duration" vs "DURATION"), detectors are not.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.to_uppercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Returns the original column spelling for a case-insensitive match.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_uppercase())
            .map(|value| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_original_spelling() {
        let lookup = CaseInsensitiveSet::new(["Duration", "QA1a"]);
        assert_eq!(lookup.get("duration"), Some("Duration"));
        assert_eq!(lookup.get("qa1A"), Some("QA1a"));
        assert!(lookup.get("missing").is_none());
    }

    #[test]
    fn first_spelling_wins_on_collision() {
        let lookup = CaseInsensitiveSet::new(["Email", "EMAIL"]);
        assert_eq!(lookup.get("email"), Some("Email"));
    }
}
