// Verdict Classifier
// Thresholds turn the raw 0-100 score into a label; they never change the score itself.

use serde::{Deserialize, Serialize};

use crate::models::VerdictLabel;

pub const DEFAULT_POSSIBLY_AI_THRESHOLD: f64 = 40.0;
pub const DEFAULT_LIKELY_AI_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictThresholds {
    #[serde(default = "default_possibly_ai")]
    pub possibly_ai: f64,
    #[serde(default = "default_likely_ai")]
    pub likely_ai: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            possibly_ai: DEFAULT_POSSIBLY_AI_THRESHOLD,
            likely_ai: DEFAULT_LIKELY_AI_THRESHOLD,
        }
    }
}

impl VerdictThresholds {
    /// Keeps `possibly_ai <= likely_ai`, both within the 0-100 scale.
    pub fn sanitized(self) -> Self {
        let possibly_ai = self.possibly_ai.clamp(0.0, 100.0);
        let likely_ai = self.likely_ai.clamp(possibly_ai, 100.0);
        Self { possibly_ai, likely_ai }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_ai_suspected: bool,
    pub label: VerdictLabel,
}

pub fn classify(score: f64, thresholds: &VerdictThresholds) -> Verdict {
    let label = if score >= thresholds.likely_ai {
        VerdictLabel::LikelyAi
    } else if score >= thresholds.possibly_ai {
        VerdictLabel::PossiblyAi
    } else {
        VerdictLabel::Human
    };

    Verdict {
        is_ai_suspected: label != VerdictLabel::Human,
        label,
    }
}

fn default_possibly_ai() -> f64 { DEFAULT_POSSIBLY_AI_THRESHOLD }
fn default_likely_ai() -> f64 { DEFAULT_LIKELY_AI_THRESHOLD }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let t = VerdictThresholds::default();
        assert_eq!(classify(39.0, &t).label, VerdictLabel::Human);
        assert_eq!(classify(40.0, &t).label, VerdictLabel::PossiblyAi);
        assert_eq!(classify(69.0, &t).label, VerdictLabel::PossiblyAi);
        assert_eq!(classify(70.0, &t).label, VerdictLabel::LikelyAi);
        assert_eq!(classify(100.0, &t).label, VerdictLabel::LikelyAi);
        assert_eq!(classify(0.0, &t).label, VerdictLabel::Human);
    }

    #[test]
    fn test_suspicion_follows_label() {
        let t = VerdictThresholds::default();
        assert!(!classify(39.0, &t).is_ai_suspected);
        assert!(classify(40.0, &t).is_ai_suspected);
        assert!(classify(70.0, &t).is_ai_suspected);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = VerdictThresholds { possibly_ai: 25.0, likely_ai: 50.0 };
        assert_eq!(classify(24.0, &t).label, VerdictLabel::Human);
        assert_eq!(classify(25.0, &t).label, VerdictLabel::PossiblyAi);
        assert_eq!(classify(50.0, &t).label, VerdictLabel::LikelyAi);
    }

    #[test]
    fn test_sanitized_orders_thresholds() {
        let t = VerdictThresholds { possibly_ai: 80.0, likely_ai: 60.0 }.sanitized();
        assert_eq!(t.possibly_ai, 80.0);
        assert_eq!(t.likely_ai, 80.0);

        let t = VerdictThresholds { possibly_ai: -5.0, likely_ai: 140.0 }.sanitized();
        assert_eq!(t, VerdictThresholds { possibly_ai: 0.0, likely_ai: 100.0 });
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let t: VerdictThresholds = serde_json::from_str(r#"{"likelyAi": 75}"#).unwrap();
        assert_eq!(t.possibly_ai, 40.0);
        assert_eq!(t.likely_ai, 75.0);
    }
}
