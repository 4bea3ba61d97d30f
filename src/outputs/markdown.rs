//! Markdown rendering of one session.
//!
//! Each tab of the "Removing Stop Words" section becomes a Markdown section.
//! The highlighted tab embeds the `<mark>` markup directly, which mdBook and
//! most Markdown viewers render inline.

use crate::models::{Session, SessionReport};
use crate::outputs::html::highlight_markup;
use crate::text::TextViews;
use std::fmt::Write;

/// Render a session and its text views as a Markdown document.
pub fn session_to_markdown(session: &Session, views: &TextViews, report: &SessionReport) -> String {
    let mut md = String::new();

    writeln!(md, "# {}\n", session.article.url).unwrap();
    writeln!(
        md,
        "_Fetched {}: {} tokens, {} stop words, {} distinct words after filtering._\n",
        session.fetched_at.to_rfc3339(),
        report.token_count,
        report.stop_word_count,
        report.distinct_words
    )
    .unwrap();

    writeln!(md, "## Original Article\n").unwrap();
    writeln!(md, "{}\n", session.text()).unwrap();

    writeln!(md, "## Stop Words Highlighted\n").unwrap();
    writeln!(md, "{}\n", highlight_markup(views.highlight())).unwrap();

    writeln!(md, "## Stop Words Removed\n").unwrap();
    writeln!(md, "{}\n", views.filtered_text()).unwrap();

    writeln!(md, "## Top Words\n").unwrap();
    if report.top_words.is_empty() {
        writeln!(md, "_No words left after filtering._").unwrap();
    } else {
        writeln!(md, "| Word | Count |").unwrap();
        writeln!(md, "|------|------:|").unwrap();
        for word in &report.top_words {
            writeln!(md, "| {} | {} |", word.text, word.weight).unwrap();
        }
    }

    md
}
