// Text Processing Service
// Normalization and tokenization shared by every detection stage

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Sentences shorter than this (trimmed, in chars) are fragments, not sentences.
pub const MIN_SENTENCE_CHARS: usize = 6;
/// Lines shorter than this (trimmed, in chars) are not counted as paragraphs.
pub const MIN_PARAGRAPH_CHARS: usize = 20;

fn sentence_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence break regex"))
}

fn letter_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{L}+").expect("letter run regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B\u{00A0}\u{3000}]+").expect("whitespace regex"))
}

/// Normalize punctuation and whitespace without changing the wording.
///
/// Curly quotes become straight quotes, the em dash becomes `-`, line endings
/// become `\n`, horizontal whitespace runs collapse to one space and every
/// line is trimmed.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace('\u{2014}', "-")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let s = horizontal_ws_re().replace_all(&s, " ");

    s.lines()
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Tokenized view of an answer, produced once and shared by the matcher and the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedText {
    /// Punctuation-normalized text, original casing kept.
    pub text: String,
    pub lowered: String,
    pub sentences: Vec<String>,
    pub paragraphs: Vec<String>,
    /// Whitespace-separated tokens of `lowered`.
    pub words: Vec<String>,
    /// Maximal letter runs of `lowered`.
    pub letter_words: Vec<String>,
}

impl NormalizedText {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

pub fn normalize(text: &str) -> NormalizedText {
    let normalized = normalize_punctuation(text);
    if normalized.is_empty() {
        return NormalizedText::default();
    }

    let lowered = normalized.to_lowercase();
    let sentences = split_sentences(&lowered);
    let paragraphs = split_paragraphs(&normalized);
    let words = lowered.split_whitespace().map(str::to_string).collect();
    let letter_words = letter_run_re()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect();

    NormalizedText {
        text: normalized,
        lowered,
        sentences,
        paragraphs,
        words,
        letter_words,
    }
}

/// Split on runs of `.`, `!` or `?`, dropping fragments under [`MIN_SENTENCE_CHARS`].
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    sentence_break_re()
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// Every line is a paragraph candidate; short lines (titles, signatures) are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    text.lines()
        .map(str::trim)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .map(str::to_string)
        .collect()
}

/// Number of whitespace-separated words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Single-line preview capped at `max_chars`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "He said \u{201c}don\u{2019}t\u{201d}\r\n  next   line  ";
        let output = normalize_punctuation(input);
        assert_eq!(output, "He said \"don't\"\nnext line");
    }

    #[test]
    fn test_split_sentences_drops_fragments() {
        let sentences = split_sentences("first sentence here!!! ok. and another one?");
        assert_eq!(sentences, vec!["first sentence here", "and another one"]);
    }

    #[test]
    fn test_split_paragraphs_drops_short_lines() {
        let text = "Title\nThis line is long enough to count.\n\nShort one\nAnother long enough paragraph line.";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        assert_eq!(normalize(""), NormalizedText::default());
        let n = normalize("   \n\t  ");
        assert!(n.is_empty());
        assert!(n.sentences.is_empty());
        assert!(n.paragraphs.is_empty());
    }

    #[test]
    fn test_normalize_tokenizes() {
        let n = normalize("Hello World. It's a sunny day!");
        assert_eq!(n.lowered, "hello world. it's a sunny day!");
        assert_eq!(n.word_count(), 6);
        assert_eq!(n.letter_words, vec!["hello", "world", "it", "s", "a", "sunny", "day"]);
        assert_eq!(n.sentence_count(), 2);
    }

    #[test]
    fn test_letter_words_keep_non_ascii_letters() {
        let n = normalize("Bugungi kunda o\u{2018}zbek tili muhim.");
        assert!(n.letter_words.contains(&"o".to_string()));
        assert!(n.letter_words.contains(&"zbek".to_string()));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("abc\ndef", 10), "abc def");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
