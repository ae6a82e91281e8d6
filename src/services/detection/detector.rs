// Detector
// Entry point: normalize -> {pattern matcher, statistical analyzer} -> scorer -> classifier.
// Pure and stateless; safe to share across threads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pattern_matcher::{find_explicit_marker, match_patterns};
use super::scoring::{score, MAX_SCORE};
use super::statistics::analyze;
use super::verdict::{classify, VerdictThresholds};
use crate::models::{DetectionInput, DetectionResult, VerdictLabel};
use crate::services::text_processor::normalize;

pub const DEFAULT_MIN_LENGTH: usize = 30;
pub const DEFAULT_MIN_WORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorOptions {
    /// Trimmed character count below which no analysis runs.
    pub min_length: usize,
    /// Word count below which no analysis runs.
    pub min_words: usize,
    pub thresholds: VerdictThresholds,
    /// Force full confidence when the text carries a self-reported AI marker.
    pub explicit_marker_override: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            min_words: DEFAULT_MIN_WORDS,
            thresholds: VerdictThresholds::default(),
            explicit_marker_override: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Detector {
    options: DetectorOptions,
}

impl Detector {
    pub fn new(options: DetectorOptions) -> Self {
        Self {
            options: DetectorOptions {
                thresholds: options.thresholds.sanitized(),
                ..options
            },
        }
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    pub fn detect_text(&self, text: &str) -> DetectionResult {
        self.detect(&DetectionInput::new(text))
    }

    pub fn detect(&self, input: &DetectionInput) -> DetectionResult {
        let min_length = input.min_length.unwrap_or(self.options.min_length);
        let trimmed_len = input.text.trim().chars().count();
        if trimmed_len < min_length {
            debug!(trimmed_len, min_length, "detection.skipped_short");
            return DetectionResult::zero();
        }

        let normalized = normalize(&input.text);
        if normalized.word_count() < self.options.min_words {
            debug!(words = normalized.word_count(), min_words = self.options.min_words, "detection.skipped_few_words");
            return DetectionResult::zero();
        }

        let patterns = match_patterns(&normalized.lowered);
        let stats = analyze(&normalized);

        let card = score(&patterns, &stats);

        if self.options.explicit_marker_override {
            if let Some(marker) = find_explicit_marker(&normalized.lowered) {
                debug!(marker, raw_score = card.points, "detection.explicit_marker");
                let mut matched_patterns = vec![marker.to_string()];
                matched_patterns.extend(patterns.categories);
                let mut reasons = card.reasons;
                reasons.push(format!("Self-reported AI marker \"{marker}\" present"));
                return DetectionResult {
                    is_ai_suspected: true,
                    confidence_score: 1.0,
                    raw_score: MAX_SCORE,
                    matched_patterns,
                    reasons,
                    label: VerdictLabel::LikelyAi,
                    statistics: Some(stats.statistics),
                };
            }
        }

        let verdict = classify(card.score(), &self.options.thresholds);
        let confidence_score = (card.score() / MAX_SCORE as f64).clamp(0.0, 1.0);

        debug!(
            raw_score = card.points,
            pattern_hits = patterns.hit_count,
            signals = stats.signals.len(),
            label = %verdict.label,
            "detection.completed"
        );

        DetectionResult {
            is_ai_suspected: verdict.is_ai_suspected,
            confidence_score,
            raw_score: card.points,
            matched_patterns: patterns.categories,
            reasons: card.reasons,
            label: verdict.label,
            statistics: Some(stats.statistics),
        }
    }
}

/// Detect with default options.
pub fn detect(text: &str) -> DetectionResult {
    Detector::default().detect_text(text)
}
