// Pattern Matcher
// Substring scan of lowered text against the phrase lexicon

use serde::{Deserialize, Serialize};

use super::lexicon::{phrases, EXPLICIT_AI_MARKERS};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    /// Distinct lexicon entries found, not occurrences.
    pub hit_count: usize,
    /// Matched entries in lexicon order.
    pub categories: Vec<String>,
}

/// Match the lexicon against already lowered text.
///
/// Containment is checked on the raw lowered string so phrases match regardless
/// of the punctuation around them.
pub fn match_patterns(lowered: &str) -> PatternMatch {
    let categories: Vec<String> = phrases()
        .filter(|(_, phrase)| lowered.contains(phrase))
        .map(|(_, phrase)| phrase.to_string())
        .collect();

    PatternMatch {
        hit_count: categories.len(),
        categories,
    }
}

/// First self-reported marker present in the lowered text.
pub fn find_explicit_marker(lowered: &str) -> Option<&'static str> {
    EXPLICIT_AI_MARKERS.iter().copied().find(|m| lowered.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hits() {
        let result = match_patterns("my dog ate my homework and i cried.");
        assert_eq!(result, PatternMatch::default());
    }

    #[test]
    fn test_counts_distinct_entries_not_occurrences() {
        let text = "furthermore, this. furthermore, that. furthermore!";
        let result = match_patterns(text);
        assert_eq!(result.hit_count, 1);
        assert_eq!(result.categories, vec!["furthermore"]);
    }

    #[test]
    fn test_categories_follow_lexicon_order() {
        let text = "in conclusion, bundan tashqari, it is important to note that.";
        let result = match_patterns(text);
        assert_eq!(result.hit_count, 3);
        assert_eq!(
            result.categories,
            vec!["it is important to note", "in conclusion", "bundan tashqari"]
        );
    }

    #[test]
    fn test_phrase_matches_across_punctuation() {
        let result = match_patterns("(first and foremost) we should...");
        assert_eq!(result.categories, vec!["first and foremost"]);
    }

    #[test]
    fn test_find_explicit_marker() {
        assert_eq!(find_explicit_marker("essay text [ai enhanced]"), Some("[ai enhanced"));
        assert_eq!(find_explicit_marker("plain essay text"), None);
    }
}
