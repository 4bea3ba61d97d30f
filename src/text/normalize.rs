//! Tokenization and normalization of article text.
//!
//! Every token sequence in the application comes out of [`Normalizer`], so
//! the highlight, filtered and frequency views can never disagree about
//! where a word starts or ends.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Shortest token kept by [`Normalizer::default`], in characters.
pub const DEFAULT_MIN_LEN: usize = 1;
/// Longest token kept by [`Normalizer::default`]: no upper bound.
pub const DEFAULT_MAX_LEN: usize = usize::MAX;

/// A normalized word: lowercase and made only of alphabetic characters.
///
/// Tokens can only be produced by a [`Normalizer`], which is what guarantees
/// those two properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Splits text into lowercase alphabetic tokens.
///
/// The default keeps every word. Length bounds (in characters, after
/// lowercasing) are opt-in; with `Normalizer::new(2, 15)` tokens outside
/// `2..=15` are dropped, as word-cloud preprocessing usually does.
/// Normalization never fails: anything without a letter in it yields no
/// tokens.
///
/// ```ignore
/// let n = Normalizer::default();
/// assert_eq!(n.normalize("THE Quick, BROWN!"), vec!["the", "quick", "brown"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    min_len: usize,
    max_len: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

impl Normalizer {
    /// Create a normalizer with explicit length bounds.
    ///
    /// A `min_len` of zero behaves like one, since empty tokens are never
    /// produced. If `max_len < min_len` every token is dropped.
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Lazily produce the tokens of `text`, in order.
    ///
    /// Words are runs of alphabetic characters; digits, punctuation, symbols
    /// and whitespace all separate them.
    pub fn tokens<'t>(&self, text: &'t str) -> impl Iterator<Item = Token> + use<'t> {
        let this = *self;
        text.split(|c: char| !c.is_alphabetic())
            .filter(|word| !word.is_empty())
            .filter_map(move |word| this.normalize_word(word))
    }

    /// Eagerly normalize `text` into a vector of tokens.
    pub fn normalize(&self, text: &str) -> Vec<Token> {
        self.tokens(text).collect()
    }

    fn normalize_word(&self, word: &str) -> Option<Token> {
        // Case mapping can introduce combining marks (e.g. 'İ'); strip them
        // so a second pass over the output finds exactly the same tokens.
        let lowered: String = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect();
        let len = lowered.chars().count();
        if len == 0 || len < self.min_len || len > self.max_len {
            return None;
        }
        Some(Token(lowered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        let n = Normalizer::default();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("   \n\t").is_empty());
        assert!(n.normalize("12 345 -- !!").is_empty());
    }

    #[test]
    fn test_lowercases_mixed_case() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("THE Quick BROWN"), vec!["the", "quick", "brown"]);
    }

    #[test]
    fn test_strips_punctuation_and_digits() {
        let n = Normalizer::default();
        assert_eq!(
            n.normalize("Hello, world! It's 2025... (really)"),
            vec!["hello", "world", "it", "s", "really"]
        );
        assert_eq!(n.normalize("covid19 e-mail"), vec!["covid", "e", "mail"]);
    }

    #[test]
    fn test_length_bounds() {
        let n = Normalizer::default();
        assert_eq!(
            n.normalize("a internationalization is hard"),
            vec!["a", "internationalization", "is", "hard"]
        );

        // "a" is too short and the 20 letter word too long
        let n = Normalizer::new(2, 15);
        assert_eq!(
            n.normalize("a internationalization is hard"),
            vec!["is", "hard"]
        );
    }

    #[test]
    fn test_unicode_letters() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("Café MÜNCHEN Straße"), vec!["café", "münchen", "straße"]);
    }

    #[test]
    fn test_lazy_matches_eager() {
        let n = Normalizer::default();
        let text = "Lazy and eager; both agree.";
        let lazy: Vec<Token> = n.tokens(text).collect();
        assert_eq!(lazy, n.normalize(text));
    }

    #[test]
    fn test_token_display_and_borrow() {
        let n = Normalizer::default();
        let tokens = n.normalize("Word");
        assert_eq!(tokens[0].to_string(), "word");
        let borrowed: &str = tokens[0].borrow();
        assert_eq!(borrowed, "word");
    }

    proptest! {
        #[test]
        fn prop_deterministic(s in "\\PC*") {
            let n = Normalizer::default();
            prop_assert_eq!(n.normalize(&s), n.normalize(&s));
        }

        #[test]
        fn prop_tokens_alphabetic_only(s in "\\PC*") {
            let n = Normalizer::default();
            for token in n.normalize(&s) {
                prop_assert!(!token.as_str().is_empty());
                prop_assert!(token.as_str().chars().all(char::is_alphabetic));
            }
        }

        #[test]
        fn prop_tokens_lowercase(s in "[a-zA-Z0-9 .,;:!?'\"()éÉüÜßàÀ-]{0,200}") {
            let n = Normalizer::default();
            for token in n.normalize(&s) {
                prop_assert_eq!(token.as_str(), token.as_str().to_lowercase());
                prop_assert!(!token.as_str().chars().any(|c| c.is_ascii_punctuation()));
            }
        }

        #[test]
        fn prop_idempotent(s in "\\PC*") {
            let n = Normalizer::default();
            let once = n.normalize(&s);
            let joined = once.iter().map(Token::as_str).collect::<Vec<_>>().join(" ");
            prop_assert_eq!(n.normalize(&joined), once);
        }
    }
}
