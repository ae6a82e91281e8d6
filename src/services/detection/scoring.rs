// Confidence Scorer
// Additive point table over pattern hits and statistical signals.
// One tier per signal category; the sum is clamped to MAX_SCORE.

use serde::{Deserialize, Serialize};

use super::pattern_matcher::PatternMatch;
use super::statistics::{StatBundle, StatSignal};

pub const MAX_SCORE: u32 = 100;

pub const PATTERN_STRONG_POINTS: u32 = 35;
pub const PATTERN_MEDIUM_POINTS: u32 = 20;
pub const PATTERN_WEAK_POINTS: u32 = 8;
pub const PATTERN_STRONG_HITS: usize = 3;
pub const PATTERN_MEDIUM_HITS: usize = 2;

pub const SENTENCE_UNIFORMITY_STRONG_POINTS: u32 = 20;
pub const SENTENCE_UNIFORMITY_WEAK_POINTS: u32 = 10;
pub const TRANSITION_HIGH_POINTS: u32 = 15;
pub const TRANSITION_MODERATE_POINTS: u32 = 8;
pub const PARAGRAPH_UNIFORMITY_POINTS: u32 = 15;
pub const LONG_WORD_POINTS: u32 = 12;
pub const CASUAL_ABSENCE_POINTS: u32 = 8;
pub const LIST_STRUCTURE_POINTS: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    /// Clamped to `0..=MAX_SCORE`.
    pub points: u32,
    pub reasons: Vec<String>,
}

impl ScoreCard {
    pub fn score(&self) -> f64 {
        self.points as f64
    }

    fn add(&mut self, points: u32, reason: String) {
        self.points += points;
        self.reasons.push(reason);
    }
}

pub fn pattern_points(hit_count: usize) -> u32 {
    if hit_count >= PATTERN_STRONG_HITS {
        PATTERN_STRONG_POINTS
    } else if hit_count >= PATTERN_MEDIUM_HITS {
        PATTERN_MEDIUM_POINTS
    } else if hit_count >= 1 {
        PATTERN_WEAK_POINTS
    } else {
        0
    }
}

pub fn score(patterns: &PatternMatch, stats: &StatBundle) -> ScoreCard {
    let mut card = ScoreCard::default();

    let hits = patterns.hit_count;
    if hits > 0 {
        let strength = match hits {
            1 => "weak",
            2 => "medium",
            _ => "strong",
        };
        card.add(
            pattern_points(hits),
            format!("{hits} AI-typical phrase(s) found ({strength} signal)"),
        );
    }

    if let Some(d) = stats.sentence_lengths {
        if stats.has(StatSignal::SentenceUniformityStrong) {
            card.add(
                SENTENCE_UNIFORMITY_STRONG_POINTS,
                format!("Sentence lengths are very uniform (cv={:.2}, mean={:.1} words)", d.cv, d.mean),
            );
        } else if stats.has(StatSignal::SentenceUniformityWeak) {
            card.add(
                SENTENCE_UNIFORMITY_WEAK_POINTS,
                format!("Sentence lengths are fairly uniform (cv={:.2}, mean={:.1} words)", d.cv, d.mean),
            );
        }
    }

    if stats.has(StatSignal::TransitionDensityHigh) {
        card.add(
            TRANSITION_HIGH_POINTS,
            format!(
                "{} formal connectives across {} sentences (heavy use)",
                stats.transition_count, stats.sentence_count
            ),
        );
    } else if stats.has(StatSignal::TransitionDensityModerate) {
        card.add(
            TRANSITION_MODERATE_POINTS,
            format!(
                "{} formal connectives across {} sentences",
                stats.transition_count, stats.sentence_count
            ),
        );
    }

    if let Some(d) = stats.paragraph_lengths {
        if stats.has(StatSignal::ParagraphUniformity) {
            card.add(
                PARAGRAPH_UNIFORMITY_POINTS,
                format!("{} paragraphs of near-identical length (cv={:.2})", d.count, d.cv),
            );
        }
    }

    if stats.has(StatSignal::LongWordDensity) {
        card.add(
            LONG_WORD_POINTS,
            format!(
                "{} distinct long words ({:.1}% of {} words)",
                stats.long_word_count,
                stats.long_word_ratio * 100.0,
                stats.word_count
            ),
        );
    }

    if stats.has(StatSignal::CasualMarkerAbsence) {
        card.add(
            CASUAL_ABSENCE_POINTS,
            format!("No contractions or casual words in {} words", stats.word_count),
        );
    }

    if stats.has(StatSignal::ListStructure) {
        card.add(
            LIST_STRUCTURE_POINTS,
            format!("{} numbered or bulleted list items", stats.list_item_count),
        );
    }

    card.points = card.points.min(MAX_SCORE);
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::statistics::Dispersion;

    fn patterns(hits: usize) -> PatternMatch {
        PatternMatch {
            hit_count: hits,
            categories: (0..hits).map(|i| format!("phrase {i}")).collect(),
        }
    }

    fn bundle_with(signals: &[StatSignal]) -> StatBundle {
        let d = Dispersion { count: 4, mean: 12.0, std_dev: 0.0, cv: 0.0 };
        StatBundle {
            word_count: 120,
            sentence_count: 6,
            sentence_lengths: Some(d),
            paragraph_lengths: Some(d),
            transition_count: 4,
            long_word_count: 12,
            long_word_ratio: 0.1,
            list_item_count: 5,
            signals: signals.to_vec(),
            ..StatBundle::default()
        }
    }

    #[test]
    fn test_pattern_tiers() {
        assert_eq!(pattern_points(0), 0);
        assert_eq!(pattern_points(1), 8);
        assert_eq!(pattern_points(2), 20);
        assert_eq!(pattern_points(3), 35);
        assert_eq!(pattern_points(12), 35);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let card = score(&PatternMatch::default(), &StatBundle::default());
        assert_eq!(card.points, 0);
        assert!(card.reasons.is_empty());
    }

    #[test]
    fn test_every_fired_row_adds_a_reason() {
        let card = score(
            &patterns(2),
            &bundle_with(&[StatSignal::SentenceUniformityWeak, StatSignal::TransitionDensityModerate]),
        );
        assert_eq!(card.points, 20 + 10 + 8);
        assert_eq!(card.reasons.len(), 3);
    }

    #[test]
    fn test_tiers_within_a_signal_are_exclusive() {
        let card = score(
            &PatternMatch::default(),
            &bundle_with(&[
                StatSignal::SentenceUniformityStrong,
                StatSignal::SentenceUniformityWeak,
                StatSignal::TransitionDensityHigh,
                StatSignal::TransitionDensityModerate,
            ]),
        );
        assert_eq!(card.points, 20 + 15);
        assert_eq!(card.reasons.len(), 2);
    }

    #[test]
    fn test_sum_is_clamped() {
        let card = score(
            &patterns(5),
            &bundle_with(&[
                StatSignal::SentenceUniformityStrong,
                StatSignal::TransitionDensityHigh,
                StatSignal::ParagraphUniformity,
                StatSignal::LongWordDensity,
                StatSignal::CasualMarkerAbsence,
                StatSignal::ListStructure,
            ]),
        );
        // 35 + 20 + 15 + 15 + 12 + 8 + 10 = 115
        assert_eq!(card.points, MAX_SCORE);
        assert_eq!(card.reasons.len(), 7);
    }

    #[test]
    fn test_more_pattern_hits_never_lower_the_score() {
        let stats = bundle_with(&[StatSignal::ListStructure]);
        let mut previous = 0;
        for hits in 0..10 {
            let points = score(&patterns(hits), &stats).points;
            assert!(points >= previous);
            previous = points;
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const ALL_SIGNALS: [StatSignal; 8] = [
            StatSignal::SentenceUniformityStrong,
            StatSignal::SentenceUniformityWeak,
            StatSignal::TransitionDensityHigh,
            StatSignal::TransitionDensityModerate,
            StatSignal::ParagraphUniformity,
            StatSignal::LongWordDensity,
            StatSignal::CasualMarkerAbsence,
            StatSignal::ListStructure,
        ];

        proptest! {
            /// Property: one more pattern hit never lowers the score, whatever signals fired.
            #[test]
            fn extra_hit_is_monotonic(hits in 0usize..20, mask in 0u8..=255) {
                let signals: Vec<StatSignal> = ALL_SIGNALS
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, s)| *s)
                    .collect();
                let stats = bundle_with(&signals);
                let before = score(&patterns(hits), &stats).points;
                let after = score(&patterns(hits + 1), &stats).points;
                prop_assert!(after >= before);
                prop_assert!(after <= MAX_SCORE);
            }
        }
    }
}
