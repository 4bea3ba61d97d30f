//! Highlight markup for stop words.
//!
//! Tokens are joined with single spaces; stop words are wrapped in a
//! `<mark>` element. Tokens only ever contain alphabetic characters, so no
//! escaping is needed.

use crate::text::TokenAnnotation;
use itertools::Itertools;

pub const HIGHLIGHT_OPEN: &str = "<mark style='background-color:yellow'>";
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// Render the highlight view as HTML-like markup.
pub fn highlight_markup(annotated: &[TokenAnnotation]) -> String {
    annotated
        .iter()
        .map(|a| {
            if a.is_stop_word {
                format!("{HIGHLIGHT_OPEN}{}{HIGHLIGHT_CLOSE}", a.token)
            } else {
                a.token.to_string()
            }
        })
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleText;
    use crate::text::{Normalizer, StopWordSet, TextPipeline};

    #[test]
    fn test_highlight_markup() {
        let stop_words = StopWordSet::new(["the", "over"]);
        let views = TextPipeline::new(Normalizer::default(), &stop_words)
            .run(&ArticleText::new("The fox jumps over it."));
        assert_eq!(
            highlight_markup(views.highlight()),
            "<mark style='background-color:yellow'>the</mark> fox jumps \
             <mark style='background-color:yellow'>over</mark> it"
        );
    }

    #[test]
    fn test_highlight_markup_empty() {
        assert_eq!(highlight_markup(&[]), "");
    }
}
