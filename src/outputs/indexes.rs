//! Index of analysed articles.
//!
//! `index.md` at the root of the output directory lists every session,
//! grouped by date:
//!
//! ```text
//! # Analysed Articles
//!
//! - [**2025-05-06**](./2025-05-06)
//!     - [https://www.bbc.com/news/world-123](./2025-05-06/www-bbc-com-news-world-123.md)
//! ```
//!
//! Re-analysing the same URL on the same day does not add a duplicate entry.

use crate::models::SessionReport;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const INDEX_HEADER: &str = "# Analysed Articles";

/// Insert `entry` under `date_heading`, creating the heading when missing.
fn insert_entry(content: &str, date_heading: &str, entry: &str) -> String {
    let mut lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    if !lines.iter().any(|l| l.starts_with(INDEX_HEADER)) {
        lines.insert(0, INDEX_HEADER.to_string());
    }

    if let Some(i) = lines.iter().position(|l| l.trim() == date_heading.trim()) {
        let mut j = i + 1;
        while j < lines.len() && lines[j].starts_with("    - ") {
            if lines[j].trim() == entry.trim() {
                return lines.join("\n") + "\n";
            }
            j += 1;
        }
        lines.insert(j, entry.to_string());
    } else {
        let pos = lines
            .iter()
            .position(|l| l.starts_with(INDEX_HEADER))
            .unwrap_or(0);
        lines.insert(pos + 1, String::new());
        lines.insert(pos + 2, date_heading.to_string());
        lines.insert(pos + 3, entry.to_string());
    }

    // Collapse the blank line doubled up by repeated date insertions
    lines.dedup_by(|a, b| a.is_empty() && b.is_empty());
    lines.join("\n") + "\n"
}

/// Add a session to `{output_dir}/index.md`.
///
/// `markdown_filename` is the session's Markdown file name inside the date
/// directory.
#[instrument(level = "info", skip_all, fields(%output_dir, date = %report.local_date, file = %markdown_filename))]
pub async fn update_session_index(
    output_dir: &str,
    report: &SessionReport,
    markdown_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let index_path = Path::new(output_dir).join("index.md");
    let content = if index_path.exists() {
        fs::read_to_string(&index_path).await?
    } else {
        String::new()
    };

    let date_heading = format!("- [**{0}**](./{0})", report.local_date);
    let entry = format!(
        "    - [{}](./{}/{})",
        report.url, report.local_date, markdown_filename
    );

    fs::write(&index_path, insert_entry(&content, &date_heading, &entry)).await?;
    info!(path = %index_path.display(), "Updated index.md");
    Ok(())
}
