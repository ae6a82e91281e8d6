// Answer Review
// Runs detection over the free-text answers of a submitted exam session

use tracing::info;

use crate::models::{
    AiUsageRecord, AnswerReview, DetectionResult, ExamAnswer, SessionAiSummary, SessionReview,
    SessionSubmission, VerdictLabel,
};
use crate::services::config_store::ReviewConfig;
use crate::services::detection::Detector;
use crate::services::text_processor::preview;

/// Detection for one answer, or `None` when the answer is not eligible.
pub fn review_answer(answer: &ExamAnswer, detector: &Detector, config: &ReviewConfig) -> Option<DetectionResult> {
    if !config.is_detectable(&answer.question_type) {
        return None;
    }
    let text = answer.value.as_free_text()?;
    Some(detector.detect_text(text))
}

pub fn usage_record(
    session_id: &str,
    answer: &ExamAnswer,
    text: &str,
    detection: &DetectionResult,
    snippet_chars: usize,
    detected_at: &str,
) -> AiUsageRecord {
    AiUsageRecord {
        session_id: session_id.to_string(),
        question_id: answer.question_id,
        was_ai_used: detection.is_ai_suspected,
        confidence_score: detection.confidence_score,
        detected_patterns: detection.matched_patterns.clone(),
        text_snippet: preview(text.trim(), snippet_chars),
        detected_at: detected_at.to_string(),
    }
}

pub fn summarize(detections: &[&DetectionResult]) -> SessionAiSummary {
    if detections.is_empty() {
        return SessionAiSummary::default();
    }

    let checked = detections.len();
    let count_label = |label: VerdictLabel| detections.iter().filter(|d| d.label == label).count();
    let total: f64 = detections.iter().map(|d| d.confidence_score).sum();
    let max_confidence = detections
        .iter()
        .map(|d| d.confidence_score)
        .fold(0.0_f64, f64::max);

    SessionAiSummary {
        checked,
        suspected: detections.iter().filter(|d| d.is_ai_suspected).count(),
        likely_ai: count_label(VerdictLabel::LikelyAi),
        possibly_ai: count_label(VerdictLabel::PossiblyAi),
        max_confidence,
        avg_confidence: total / checked as f64,
    }
}

/// Review every answer in a session; usage records are produced for checked answers only.
pub fn review_session(submission: &SessionSubmission, detector: &Detector, config: &ReviewConfig) -> SessionReview {
    let reviewed_at = chrono::Utc::now().to_rfc3339();

    let items: Vec<AnswerReview> = submission
        .answers
        .iter()
        .map(|answer| AnswerReview {
            question_id: answer.question_id,
            question_type: answer.question_type.clone(),
            detection: review_answer(answer, detector, config),
        })
        .collect();

    let usage_records: Vec<AiUsageRecord> = submission
        .answers
        .iter()
        .zip(items.iter())
        .filter_map(|(answer, item)| {
            let detection = item.detection.as_ref()?;
            let text = answer.value.as_free_text()?;
            Some(usage_record(
                &submission.session_id,
                answer,
                text,
                detection,
                config.snippet_chars,
                &reviewed_at,
            ))
        })
        .collect();

    let detections: Vec<&DetectionResult> = items.iter().filter_map(|i| i.detection.as_ref()).collect();
    let summary = summarize(&detections);

    info!(
        session_id = %submission.session_id,
        answers = submission.answers.len(),
        checked = summary.checked,
        suspected = summary.suspected,
        "session.reviewed"
    );

    SessionReview {
        review_id: uuid::Uuid::new_v4().to_string(),
        session_id: submission.session_id.clone(),
        reviewed_at,
        items,
        summary,
        usage_records,
    }
}
