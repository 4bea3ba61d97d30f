//! Single-page article fetcher.
//!
//! Works on any site that wraps its story in one container element. The
//! container is located with a CSS selector (`article` unless configured
//! otherwise) and its text nodes are trimmed and joined with single spaces.
//! Text inside `<script>`, `<style>` and `<noscript>` is skipped.

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::models::{ArticleText, FetchedArticle};
use crate::utils::collapse_whitespace;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Build the HTTP client used for article fetching.
pub fn build_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}

/// Fetch `url` and extract the text of its content container.
///
/// # Returns
///
/// The raw HTML together with the extracted [`ArticleText`], or a
/// [`FetchError`] describing why no text is available.
#[instrument(level = "info", skip(client), fields(%url))]
pub async fn fetch_article(
    client: &Client,
    url: &str,
    selector: &str,
) -> Result<FetchedArticle, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };
    let response = client
        .get(parsed.clone())
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        warn!(%status, "Article fetch returned an error status");
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let html = response.text().await.map_err(request_error)?;
    debug!(bytes = html.len(), "Downloaded article page");

    let text = extract_article_text(&html, selector)?.ok_or_else(|| {
        FetchError::MissingContainer {
            url: url.to_string(),
            selector: selector.to_string(),
        }
    })?;

    info!(bytes = text.len(), "Extracted article text");
    Ok(FetchedArticle {
        url: parsed.to_string(),
        html,
        text,
    })
}

/// Extract the text of the first element matching `selector`.
///
/// Returns `Ok(None)` when nothing matches. An empty container yields an
/// empty [`ArticleText`], not `None`.
pub fn extract_article_text(html: &str, selector: &str) -> Result<Option<ArticleText>, FetchError> {
    let selector_parsed =
        Selector::parse(selector).map_err(|_| FetchError::Selector(selector.to_string()))?;
    let document = Html::parse_document(html);

    let Some(container) = document.select(&selector_parsed).next() else {
        return Ok(None);
    };

    let mut pieces: Vec<&str> = Vec::new();
    for node in container.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if skipped {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    Ok(Some(ArticleText::new(collapse_whitespace(&pieces.join(" ")))))
}
