// Statistical Analyzer
// Uniformity, vocabulary and structure metrics over normalized text.
// Each metric is guarded on its own; a metric without enough data is absent, never an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use super::lexicon::{CASUAL_WORDS, TRANSITION_WORDS};
use crate::models::TextStatistics;
use crate::services::text_processor::{count_words, NormalizedText};

pub const MIN_UNIFORMITY_SAMPLES: usize = 3;

pub const SENTENCE_CV_STRONG: f64 = 0.25;
pub const SENTENCE_MEAN_STRONG: f64 = 8.0;
pub const SENTENCE_CV_WEAK: f64 = 0.35;
pub const SENTENCE_MEAN_WEAK: f64 = 10.0;

pub const PARAGRAPH_CV_MAX: f64 = 0.2;

pub const TRANSITION_RATIO_HIGH: f64 = 0.5;
pub const TRANSITION_COUNT_HIGH: usize = 3;
pub const TRANSITION_RATIO_MODERATE: f64 = 0.3;
pub const TRANSITION_COUNT_MODERATE: usize = 2;

/// Words longer than this many letters count as long.
pub const LONG_WORD_MIN_EXCLUSIVE: usize = 10;
pub const LONG_WORD_RATIO: f64 = 0.08;
pub const LONG_WORD_MIN_WORDS: usize = 30;

pub const CASUAL_ABSENCE_MIN_WORDS: usize = 50;

pub const LIST_MIN_ITEMS: usize = 3;
pub const LIST_MIN_WORDS: usize = 40;

/// Threshold crossings reported by the analyzer; point values live in the scorer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatSignal {
    SentenceUniformityStrong,
    SentenceUniformityWeak,
    TransitionDensityHigh,
    TransitionDensityModerate,
    ParagraphUniformity,
    LongWordDensity,
    CasualMarkerAbsence,
    ListStructure,
}

/// Population dispersion of a set of lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispersion {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Coefficient of variation, `std_dev / mean`.
    pub cv: f64,
}

impl Dispersion {
    pub fn of(values: &[usize]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<usize>() as f64 / n;
        if mean <= 0.0 {
            return None;
        }
        let variance = values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();
        Some(Self {
            count: values.len(),
            mean,
            std_dev,
            cv: std_dev / mean,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBundle {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    /// Present for three or more sentences.
    pub sentence_lengths: Option<Dispersion>,
    /// Present for three or more paragraphs.
    pub paragraph_lengths: Option<Dispersion>,
    pub transition_count: usize,
    pub transition_ratio: f64,
    pub long_word_count: usize,
    pub long_word_ratio: f64,
    pub contraction_count: usize,
    pub casual_marker_count: usize,
    pub list_item_count: usize,
    pub statistics: TextStatistics,
    pub signals: Vec<StatSignal>,
}

impl StatBundle {
    pub fn has(&self, signal: StatSignal) -> bool {
        self.signals.contains(&signal)
    }
}

fn transition_res() -> &'static [(&'static str, Regex)] {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        TRANSITION_WORDS
            .iter()
            .map(|w| {
                let re = Regex::new(&format!(r"\b{}\b", regex::escape(w))).expect("transition regex");
                (*w, re)
            })
            .collect()
    })
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*(?:\d+[.)]|[A-Za-z][.)]|[-•])[ \t]").expect("list item regex")
    })
}

/// Distinct connectives present, on word boundaries.
pub fn count_transitions(lowered: &str) -> usize {
    transition_res()
        .iter()
        .filter(|(_, re)| re.is_match(lowered))
        .count()
}

pub fn count_list_items(text: &str) -> usize {
    list_item_re().find_iter(text).count()
}

pub fn count_contractions(text: &str) -> usize {
    text.chars().filter(|c| *c == '\'' || *c == '\u{2019}').count()
}

pub fn count_casual_markers(words: &[String]) -> usize {
    words
        .iter()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| CASUAL_WORDS.contains(w))
        .count()
}

fn text_statistics(normalized: &NormalizedText, sentence_lengths: &[usize]) -> TextStatistics {
    let word_count = normalized.word_count();
    let sentence_count = normalized.sentence_count();
    if word_count == 0 {
        return TextStatistics::default();
    }

    let avg_word_length =
        normalized.words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64;
    let unique: HashSet<&str> = normalized.words.iter().map(String::as_str).collect();
    let sentence = Dispersion::of(sentence_lengths);

    TextStatistics {
        word_count,
        sentence_count,
        avg_word_length,
        avg_sentence_length: sentence.map(|d| d.mean).unwrap_or(0.0),
        sentence_length_std: sentence.map(|d| d.std_dev).unwrap_or(0.0),
        unique_word_ratio: unique.len() as f64 / word_count as f64,
    }
}

pub fn analyze(normalized: &NormalizedText) -> StatBundle {
    let word_count = normalized.word_count();
    let sentence_count = normalized.sentence_count();
    let mut signals = Vec::new();

    // 1. Sentence uniformity
    let sentence_word_counts: Vec<usize> = normalized.sentences.iter().map(|s| count_words(s)).collect();
    let sentence_lengths = if sentence_count >= MIN_UNIFORMITY_SAMPLES {
        Dispersion::of(&sentence_word_counts)
    } else {
        None
    };
    if let Some(d) = sentence_lengths {
        if d.cv < SENTENCE_CV_STRONG && d.mean > SENTENCE_MEAN_STRONG {
            signals.push(StatSignal::SentenceUniformityStrong);
        } else if d.cv < SENTENCE_CV_WEAK && d.mean > SENTENCE_MEAN_WEAK {
            signals.push(StatSignal::SentenceUniformityWeak);
        }
    }

    // 2. Paragraph uniformity
    let paragraph_count = normalized.paragraphs.len();
    let paragraph_lengths = if paragraph_count >= MIN_UNIFORMITY_SAMPLES {
        let counts: Vec<usize> = normalized.paragraphs.iter().map(|p| count_words(p)).collect();
        Dispersion::of(&counts)
    } else {
        None
    };
    if paragraph_lengths.is_some_and(|d| d.cv < PARAGRAPH_CV_MAX) {
        signals.push(StatSignal::ParagraphUniformity);
    }

    // 3. Transition density
    let transition_count = count_transitions(&normalized.lowered);
    let transition_ratio = transition_count as f64 / sentence_count.max(1) as f64;
    if transition_ratio > TRANSITION_RATIO_HIGH && transition_count >= TRANSITION_COUNT_HIGH {
        signals.push(StatSignal::TransitionDensityHigh);
    } else if transition_ratio > TRANSITION_RATIO_MODERATE && transition_count >= TRANSITION_COUNT_MODERATE {
        signals.push(StatSignal::TransitionDensityModerate);
    }

    // 4. Long-word density
    let unique_letter_words: HashSet<&str> = normalized.letter_words.iter().map(String::as_str).collect();
    let long_word_count = unique_letter_words
        .iter()
        .filter(|w| w.chars().count() > LONG_WORD_MIN_EXCLUSIVE)
        .count();
    let long_word_ratio = if word_count > 0 {
        long_word_count as f64 / word_count as f64
    } else {
        0.0
    };
    if word_count > LONG_WORD_MIN_WORDS && long_word_ratio > LONG_WORD_RATIO {
        signals.push(StatSignal::LongWordDensity);
    }

    // 5. Casual-marker absence
    let contraction_count = count_contractions(&normalized.text);
    let casual_marker_count = count_casual_markers(&normalized.words);
    if word_count > CASUAL_ABSENCE_MIN_WORDS && contraction_count == 0 && casual_marker_count == 0 {
        signals.push(StatSignal::CasualMarkerAbsence);
    }

    // 6. List structure
    let list_item_count = count_list_items(&normalized.text);
    if list_item_count >= LIST_MIN_ITEMS && word_count > LIST_MIN_WORDS {
        signals.push(StatSignal::ListStructure);
    }

    StatBundle {
        word_count,
        sentence_count,
        paragraph_count,
        sentence_lengths,
        paragraph_lengths,
        transition_count,
        transition_ratio,
        long_word_count,
        long_word_ratio,
        contraction_count,
        casual_marker_count,
        list_item_count,
        statistics: text_statistics(normalized, &sentence_word_counts),
        signals,
    }
}
