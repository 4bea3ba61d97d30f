//! Stop-word sets and classification.
//!
//! A [`StopWordSet`] is built once, at startup, from an embedded list and
//! then only ever read. The pipeline borrows it, so tests can hand in any
//! set they like without touching shared state.

use crate::text::Token;
use serde::Deserialize;
use std::collections::HashSet;
use stop_words::{LANGUAGE, get};

/// English stop words as published in gist `sebleier/554280` (the NLTK
/// English corpus, 127 words).
pub const NLTK_ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now",
];

/// Which embedded list a [`StopWordSet`] starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StopWordList {
    /// The 127-word NLTK English list.
    #[default]
    Nltk,
    /// The larger stopwords-iso English list shipped with the `stop-words` crate.
    Iso,
}

/// An immutable set of lowercase stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Build a set from any list of words. Words are lowercased on the way in.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The NLTK English list.
    pub fn nltk_english() -> Self {
        Self::new(NLTK_ENGLISH)
    }

    /// The stopwords-iso English list.
    pub fn iso_english() -> Self {
        Self::new(get(LANGUAGE::English).iter().map(|w| w.to_string()))
    }

    pub fn from_list(list: StopWordList) -> Self {
        match list {
            StopWordList::Nltk => Self::nltk_english(),
            StopWordList::Iso => Self::iso_english(),
        }
    }

    /// Extend the set with more words before it is handed out.
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Case-insensitive membership test on an arbitrary word.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    /// Whether a normalized token is a stop word. Tokens are already
    /// lowercase, so this is a plain lookup.
    pub fn is_stop_word(&self, token: &Token) -> bool {
        self.words.contains(token.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Normalizer;

    #[test]
    fn test_nltk_list_size() {
        assert_eq!(NLTK_ENGLISH.len(), 127);
        assert_eq!(StopWordSet::nltk_english().len(), 127);
    }

    #[test]
    fn test_iso_list_loads() {
        let set = StopWordSet::iso_english();
        assert!(!set.is_empty());
        assert!(set.contains("the"));
    }

    #[test]
    fn test_case_insensitive_contains() {
        let set = StopWordSet::nltk_english();
        assert!(set.contains("the"));
        assert!(set.contains("The"));
        assert!(set.contains("THE"));
        assert!(!set.contains("fox"));
    }

    #[test]
    fn test_custom_set_lowercases_input() {
        let set = StopWordSet::new(["The", " OVER "]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("over"));
    }

    #[test]
    fn test_no_stemming() {
        let set = StopWordSet::new(["run"]);
        assert!(set.contains("run"));
        assert!(!set.contains("running"));
        assert!(!set.contains("runs"));
    }

    #[test]
    fn test_with_extra() {
        let set = StopWordSet::nltk_english().with_extra(["Said", "", "reuters"]);
        assert_eq!(set.len(), 129);
        assert!(set.contains("said"));
    }

    #[test]
    fn test_is_stop_word_on_tokens() {
        let set = StopWordSet::new(["the", "over"]);
        let tokens = Normalizer::default().normalize("THE fox jumps Over");
        let flags: Vec<bool> = tokens.iter().map(|t| set.is_stop_word(t)).collect();
        assert_eq!(flags, vec![true, false, false, true]);
    }

    #[test]
    fn test_from_list() {
        assert_eq!(
            StopWordSet::from_list(StopWordList::Nltk),
            StopWordSet::nltk_english()
        );
        assert_eq!(StopWordList::default(), StopWordList::Nltk);
    }
}
