//! One normalization pass, three views.
//!
//! [`TextPipeline::run`] tokenizes the article exactly once and derives the
//! highlight, filtered and frequency views from that single token sequence.

use crate::models::ArticleText;
use crate::text::{Normalizer, StopWordSet, Token};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A token paired with its stop-word flag, for highlighted display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenAnnotation {
    pub token: Token,
    pub is_stop_word: bool,
}

/// Token → occurrence count.
pub type Frequency = BTreeMap<Token, usize>;

/// Stateless text pipeline: a normalizer plus a borrowed stop-word set.
#[derive(Debug, Clone, Copy)]
pub struct TextPipeline<'a> {
    normalizer: Normalizer,
    stop_words: &'a StopWordSet,
}

impl<'a> TextPipeline<'a> {
    pub fn new(normalizer: Normalizer, stop_words: &'a StopWordSet) -> Self {
        Self {
            normalizer,
            stop_words,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn stop_words(&self) -> &StopWordSet {
        self.stop_words
    }

    /// Normalize `text` once and derive every view from the result.
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn run(&self, text: &ArticleText) -> TextViews {
        let annotated: Vec<TokenAnnotation> = self
            .normalizer
            .tokens(text.as_str())
            .map(|token| {
                let is_stop_word = self.stop_words.is_stop_word(&token);
                TokenAnnotation {
                    token,
                    is_stop_word,
                }
            })
            .collect();

        let filtered: Vec<Token> = annotated
            .iter()
            .filter(|a| !a.is_stop_word)
            .map(|a| a.token.clone())
            .collect();

        let frequency = count(filtered.iter());

        debug!(
            tokens = annotated.len(),
            kept = filtered.len(),
            distinct = frequency.len(),
            "Built text views"
        );

        TextViews {
            annotated,
            filtered,
            frequency,
        }
    }
}

fn count<'t>(tokens: impl Iterator<Item = &'t Token>) -> Frequency {
    let mut frequency = Frequency::new();
    for token in tokens {
        *frequency.entry(token.clone()).or_insert(0) += 1;
    }
    frequency
}

/// The three views over one normalized article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextViews {
    annotated: Vec<TokenAnnotation>,
    filtered: Vec<Token>,
    frequency: Frequency,
}

impl TextViews {
    /// Every token in order, each flagged as stop word or not.
    pub fn highlight(&self) -> &[TokenAnnotation] {
        &self.annotated
    }

    /// Tokens with stop words removed, in order.
    pub fn filtered(&self) -> &[Token] {
        &self.filtered
    }

    /// Occurrence counts over the filtered view.
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Occurrence counts over all tokens, stop words included.
    pub fn token_frequency(&self) -> Frequency {
        count(self.annotated.iter().map(|a| &a.token))
    }

    /// The filtered view joined with single spaces.
    pub fn filtered_text(&self) -> String {
        self.filtered.iter().join(" ")
    }

    /// Frequency entries sorted by count (descending) then token, at most `limit`.
    pub fn ranked(&self, limit: usize) -> Vec<(&Token, usize)> {
        rank(&self.frequency, limit)
    }

    pub fn token_count(&self) -> usize {
        self.annotated.len()
    }

    pub fn stop_word_count(&self) -> usize {
        self.annotated.iter().filter(|a| a.is_stop_word).count()
    }

    pub fn is_empty(&self) -> bool {
        self.annotated.is_empty()
    }
}

/// Sort a frequency map by count (descending) then token, keeping `limit` entries.
pub fn rank(frequency: &Frequency, limit: usize) -> Vec<(&Token, usize)> {
    frequency
        .iter()
        .map(|(token, n)| (token, *n))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .take(limit)
        .collect()
}
