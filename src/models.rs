//! Data models shared across the application.
//!
//! - [`ArticleText`]: the extracted body text of one article
//! - [`FetchedArticle`]: an article as fetched (URL, raw HTML, text)
//! - [`Session`]: the explicit per-run state handed to each section
//! - [`CoStarFields`]: the six free-text fields of a CO-STAR prompt
//! - [`SessionReport`]: the serializable summary written to disk

use crate::text::{TextViews, Token};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The body text of one fetched article. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArticleText(String);

impl ArticleText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArticleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An article as returned by the fetcher.
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    /// The URL the article was fetched from.
    pub url: String,
    /// The raw HTML of the page.
    pub html: String,
    /// Text extracted from the page's article container.
    pub text: ArticleText,
}

/// State for one run of the tool.
///
/// A session only exists once an article has been fetched successfully, so
/// nothing downstream can run against missing text.
#[derive(Debug, Clone)]
pub struct Session {
    pub article: FetchedArticle,
    pub fetched_at: DateTime<Utc>,
}

impl Session {
    pub fn new(article: FetchedArticle) -> Self {
        Self {
            article,
            fetched_at: Utc::now(),
        }
    }

    pub fn text(&self) -> &ArticleText {
        &self.article.text
    }
}

/// The six CO-STAR prompt fields. Plain free text, never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoStarFields {
    pub context: String,
    pub objective: String,
    pub style: String,
    pub tone: String,
    pub audience: String,
    pub response_format: String,
}

/// One word of a word cloud with its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedWord {
    pub text: String,
    pub weight: usize,
}

/// Serializable summary of a session's text analysis.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    /// Date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    pub article_bytes: usize,
    pub token_count: usize,
    pub stop_word_count: usize,
    pub distinct_words: usize,
    pub top_words: Vec<WeightedWord>,
    pub filtered_text: String,
}

impl SessionReport {
    /// Summarize `views` for `session`, keeping the `top` most frequent words.
    pub fn new(session: &Session, views: &TextViews, top: usize) -> Self {
        Self {
            url: session.article.url.clone(),
            fetched_at: session.fetched_at,
            local_date: session
                .fetched_at
                .with_timezone(&chrono::Local)
                .date_naive()
                .to_string(),
            article_bytes: session.text().len(),
            token_count: views.token_count(),
            stop_word_count: views.stop_word_count(),
            distinct_words: views.frequency().len(),
            top_words: weighted(views.ranked(top)),
            filtered_text: views.filtered_text(),
        }
    }
}

/// Turn ranked `(token, count)` pairs into weighted words.
pub fn weighted(ranked: Vec<(&Token, usize)>) -> Vec<WeightedWord> {
    ranked
        .into_iter()
        .map(|(token, weight)| WeightedWord {
            text: token.to_string(),
            weight,
        })
        .collect()
}

/// A question asked about a session's article and the answer received.
#[derive(Debug, Serialize)]
pub struct AnswerRecord {
    pub url: String,
    pub asked_at: DateTime<Utc>,
    pub model: String,
    pub fields: CoStarFields,
    pub answer: String,
}
