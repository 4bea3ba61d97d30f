//! Colored terminal output for each tab of a section.
//!
//! Everything here writes to stdout; logs go to stderr so the two never
//! interleave in a pipe.

use crate::models::ArticleText;
use crate::outputs::cloud::{TerminalCloudRenderer, WordCloudRenderer};
use crate::text::{Frequency, TextViews, TokenAnnotation};
use colored::Colorize;
use itertools::Itertools;

/// Print a tab heading.
pub fn display_tab(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
}

pub fn display_html_source(html: &str) {
    display_tab("HTML Source Code");
    println!("{html}");
}

pub fn display_article_text(text: &ArticleText) {
    display_tab("Article Text");
    if text.is_empty() {
        println!("{}", "(the article container is empty)".dimmed());
    } else {
        println!("{text}");
    }
}

/// Stop words are shown with a yellow background, everything else as-is.
pub fn highlighted_line(annotated: &[TokenAnnotation]) -> String {
    annotated
        .iter()
        .map(|a| {
            if a.is_stop_word {
                a.token.as_str().black().on_yellow().to_string()
            } else {
                a.token.to_string()
            }
        })
        .join(" ")
}

pub fn display_highlighted(views: &TextViews) {
    display_tab("Stop Words Highlighted");
    println!("{}", highlighted_line(views.highlight()));
    println!(
        "\n  {} {} of {} tokens are stop words",
        "~".yellow(),
        views.stop_word_count(),
        views.token_count()
    );
}

pub fn display_removed(views: &TextViews) {
    display_tab("Stop Words Removed");
    println!("{}", views.filtered_text());
}

pub fn display_word_cloud(frequency: &Frequency) {
    display_tab("Word Cloud");
    if frequency.is_empty() {
        println!("{}", "(no words to draw)".dimmed());
        return;
    }
    print!("{}", TerminalCloudRenderer::default().render(frequency));
}

pub fn display_prompt(prompt: &str) {
    display_tab("Prompt");
    println!("{}", prompt.dimmed());
}

pub fn display_answer(answer: &str) {
    display_tab("Answer");
    println!("{answer}");
}
