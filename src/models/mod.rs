// ExamGuard Data Models
// Plain records exchanged with the grading side of the exam platform

use serde::{Deserialize, Serialize};

// ============ Detection Input ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionInput {
    pub text: String,
    /// Overrides the configured minimum trimmed length for this call.
    #[serde(default)]
    pub min_length: Option<usize>,
}

impl DetectionInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            min_length: None,
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }
}

// ============ Detection Result ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictLabel {
    Human,
    PossiblyAi,
    LikelyAi,
}

impl VerdictLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictLabel::Human => "HUMAN",
            VerdictLabel::PossiblyAi => "POSSIBLY_AI",
            VerdictLabel::LikelyAi => "LIKELY_AI",
        }
    }

    /// Wording shown to instructors in review screens.
    pub fn description(self) -> &'static str {
        match self {
            VerdictLabel::Human => "Written by the student",
            VerdictLabel::PossiblyAi => "AI may have been used",
            VerdictLabel::LikelyAi => "Likely written by AI",
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    /// Mean words per sentence.
    pub avg_sentence_length: f64,
    pub sentence_length_std: f64,
    pub unique_word_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub is_ai_suspected: bool,
    /// Canonical 0.0-1.0 scale.
    pub confidence_score: f64,
    /// Additive points on the 0-100 display scale.
    pub raw_score: u32,
    pub matched_patterns: Vec<String>,
    pub reasons: Vec<String>,
    pub label: VerdictLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<TextStatistics>,
}

impl DetectionResult {
    /// Result for text too short to analyze.
    pub fn zero() -> Self {
        Self {
            is_ai_suspected: false,
            confidence_score: 0.0,
            raw_score: 0,
            matched_patterns: vec![],
            reasons: vec![],
            label: VerdictLabel::Human,
            statistics: None,
        }
    }

    pub fn display_score(&self) -> f64 {
        self.confidence_score * 100.0
    }
}

// ============ Exam Answers ============

/// Submitted answer value: an option index for choice questions, text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    ChoiceIndex(i64),
    FreeText(String),
}

impl AnswerValue {
    pub fn as_free_text(&self) -> Option<&str> {
        match self {
            AnswerValue::FreeText(text) => Some(text.as_str()),
            AnswerValue::ChoiceIndex(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAnswer {
    pub question_id: i64,
    /// `multiple_choice`, `vocabulary`, `writing`, `translation`, ...
    pub question_type: String,
    pub value: AnswerValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSubmission {
    pub session_id: String,
    #[serde(default)]
    pub answers: Vec<ExamAnswer>,
}

// ============ Answer Review ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReview {
    pub question_id: i64,
    pub question_type: String,
    /// `None` when the answer was not eligible for detection.
    pub detection: Option<DetectionResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAiSummary {
    pub checked: usize,
    pub suspected: usize,
    pub likely_ai: usize,
    pub possibly_ai: usize,
    pub max_confidence: f64,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReview {
    pub review_id: String,
    pub session_id: String,
    pub reviewed_at: String,
    pub items: Vec<AnswerReview>,
    pub summary: SessionAiSummary,
    pub usage_records: Vec<AiUsageRecord>,
}

// ============ Persistence Shape ============

/// Detection attached to an answer, keyed by (session, question).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiUsageRecord {
    pub session_id: String,
    pub question_id: i64,
    pub was_ai_used: bool,
    pub confidence_score: f64,
    #[serde(default)]
    pub detected_patterns: Vec<String>,
    #[serde(default)]
    pub text_snippet: String,
    pub detected_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_value_untagged() {
        let choice: AnswerValue = serde_json::from_str("2").unwrap();
        assert_eq!(choice, AnswerValue::ChoiceIndex(2));
        assert_eq!(choice.as_free_text(), None);

        let text: AnswerValue = serde_json::from_str("\"my essay\"").unwrap();
        assert_eq!(text.as_free_text(), Some("my essay"));
    }

    #[test]
    fn test_submission_parsing() {
        let json = r#"{
            "sessionId": "abc",
            "answers": [
                {"questionId": 1, "questionType": "multiple_choice", "value": 0},
                {"questionId": 7, "questionType": "writing", "value": "Dear teacher"}
            ]
        }"#;
        let parsed: SessionSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.answers.len(), 2);
        assert_eq!(parsed.answers[1].value, AnswerValue::FreeText("Dear teacher".to_string()));
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&VerdictLabel::PossiblyAi).unwrap(), "\"POSSIBLY_AI\"");
        assert_eq!(VerdictLabel::LikelyAi.to_string(), "LIKELY_AI");
    }

    #[test]
    fn test_zero_result_has_no_statistics() {
        let zero = DetectionResult::zero();
        let json = serde_json::to_value(&zero).unwrap();
        assert!(json.get("statistics").is_none());
        assert_eq!(json["label"], "HUMAN");
        assert_eq!(zero.display_score(), 0.0);
    }
}
