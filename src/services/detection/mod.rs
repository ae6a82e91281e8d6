// Detection Module
// Heuristic AI-text detection organized into specialized submodules:
// - lexicon: Phrase, connective and casual-marker word lists
// - pattern_matcher: Finds lexicon phrases in lowered text
// - statistics: Sentence/paragraph dispersion and lexical density signals
// - scoring: Turns pattern hits and signals into a 0-100 score with reasons
// - verdict: Maps a score onto a label via configurable thresholds
// - detector: Runs the whole pipeline for one text

pub mod lexicon;
pub mod pattern_matcher;
pub mod statistics;
pub mod scoring;
pub mod verdict;
pub mod detector;

// Re-export commonly used items
pub use detector::{detect, Detector, DetectorOptions, DEFAULT_MIN_LENGTH, DEFAULT_MIN_WORDS};
pub use lexicon::Locale;
pub use pattern_matcher::{find_explicit_marker, match_patterns, PatternMatch};
pub use scoring::{score, ScoreCard, MAX_SCORE};
pub use statistics::{analyze, Dispersion, StatBundle, StatSignal};
pub use verdict::{classify, Verdict, VerdictThresholds};
