// Lexicon
// Static phrase and word lists; loaded once, never mutated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Uz,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Uz => "uz",
        }
    }
}

/// Phrases typical of generated English prose.
pub const AI_PHRASES_EN: &[&str] = &[
    "it is important to note",
    "it is worth noting",
    "in conclusion",
    "furthermore",
    "moreover",
    "additionally",
    "in today's world",
    "in today's society",
    "plays a crucial role",
    "plays a vital role",
    "it is essential to",
    "on the other hand",
    "in summary",
    "as a result",
    "consequently",
    "nevertheless",
    "nonetheless",
    "in light of",
    "with regard to",
    "in terms of",
    "it can be argued",
    "one could argue",
    "it goes without saying",
    "last but not least",
    "to sum up",
    "all in all",
    "taking everything into consideration",
    "from my perspective",
    "in my opinion",
    "first and foremost",
    "significantly",
    "fundamentally",
    "transforming how",
    "rapidly shaping",
    "undeniably",
    "indispensable",
    "paramount",
    "multifaceted",
    "delve into",
    "tapestry",
    "landscape of",
    "navigating the",
    "ever-evolving",
    "harness the power",
    "pave the way",
    "shed light on",
    "foster a sense of",
    "a testament to",
    "serves as a",
    "it is imperative",
    "encompasses a wide range",
    "strikes a balance",
    "holistic approach",
    "nuanced understanding",
    "artificial intelligence is rapidly",
    "the future of humanity",
    "from healthcare to education",
    "transforming how people",
    "intelligent machines",
    "reshaping the way",
    "revolutionizing",
    "pivotal role",
    "profound impact",
];

/// Uzbek equivalents of the English phrase list.
pub const AI_PHRASES_UZ: &[&str] = &[
    "shuni ta'kidlash kerak",
    "bugungi kunda",
    "xulosa qilib aytganda",
    "bundan tashqari",
    "shuningdek",
    "qo'shimcha ravishda",
    "zamonaviy dunyoda",
    "muhim rol o'ynaydi",
    "hal qiluvchi ahamiyatga ega",
    "boshqa tomondan",
    "natijada",
    "shunga qaramay",
    "fikrimcha",
    "eng avvalo",
    "sezilarli darajada",
    "o'z navbatida",
    "shubhasiz",
    "ta'kidlash joiz",
    "yakunlab aytganda",
    "umuman olganda",
];

/// Scan order of the phrase lexicon.
pub const PHRASE_LEXICON: &[(Locale, &[&str])] = &[(Locale::En, AI_PHRASES_EN), (Locale::Uz, AI_PHRASES_UZ)];

/// Formal connectives counted for transition density.
pub const TRANSITION_WORDS: &[&str] = &[
    "however",
    "moreover",
    "furthermore",
    "additionally",
    "consequently",
    "nevertheless",
    "therefore",
    "thus",
    "hence",
    "meanwhile",
    "subsequently",
    "accordingly",
    "biroq",
    "shuningdek",
    "bundan tashqari",
    "natijada",
    "shuning uchun",
    "demak",
    "binobarin",
];

/// Informal tokens that rarely appear in generated answers.
pub const CASUAL_WORDS: &[&str] = &["ok", "yeah", "gonna", "wanna", "kinda", "ya", "lol", "btw"];

/// Self-reported markers some tools append to rewritten text.
pub const EXPLICIT_AI_MARKERS: &[&str] = &["[ai enhanced", "[ai assisted"];

/// Every phrase in scan order.
pub fn phrases() -> impl Iterator<Item = (Locale, &'static str)> {
    PHRASE_LEXICON
        .iter()
        .flat_map(|(locale, list)| list.iter().map(move |p| (*locale, *p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lexicon_entries_are_lowercase_and_unique() {
        let mut seen = HashSet::new();
        for (_, phrase) in phrases() {
            assert_eq!(phrase, phrase.to_lowercase(), "{phrase}");
            assert!(seen.insert(phrase), "duplicate phrase {phrase}");
        }
        for word in TRANSITION_WORDS.iter().chain(CASUAL_WORDS) {
            assert_eq!(*word, word.to_lowercase());
        }
    }

    #[test]
    fn test_scan_order_is_english_first() {
        let first = phrases().next().unwrap();
        assert_eq!(first, (Locale::En, "it is important to note"));
        let last = phrases().last().unwrap();
        assert_eq!(last, (Locale::Uz, "umuman olganda"));
        assert_eq!(phrases().count(), AI_PHRASES_EN.len() + AI_PHRASES_UZ.len());
    }
}
