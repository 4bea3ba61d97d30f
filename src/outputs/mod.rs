//! Display and output generation.
//!
//! # Submodules
//!
//! - [`terminal`]: colored stdout rendering of each tab
//! - [`html`]: `<mark>` highlight markup for stop words
//! - [`cloud`]: word-cloud renderers fed by the frequency view
//! - [`json`]: JSON files for session reports and word clouds
//! - [`markdown`]: Markdown rendering of a session
//! - [`indexes`]: `index.md` listing every analysed article
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── index.md
//! └── 2025-05-06/
//!     ├── www-bbc-com-news-world-123.json
//!     ├── www-bbc-com-news-world-123.cloud.json
//!     └── www-bbc-com-news-world-123.md
//! ```

pub mod cloud;
pub mod html;
pub mod indexes;
pub mod json;
pub mod markdown;
pub mod terminal;
