//! Article fetching.
//!
//! The fetcher is the only way an [`ArticleText`](crate::models::ArticleText)
//! comes into existence at runtime. It works in two steps:
//!
//! 1. **Fetching**: download the page, failing on transport errors and
//!    non-2xx statuses
//! 2. **Extraction**: find the single content container (by default the
//!    first `<article>` element) and collect its text
//!
//! | Failure | [`FetchError`](crate::error::FetchError) variant |
//! |---------|----------------------|
//! | URL does not parse | `InvalidUrl` |
//! | Network / TLS / timeout | `Request` |
//! | Non-2xx status | `Status` |
//! | No element matches the selector | `MissingContainer` |
//! | Selector itself is malformed | `Selector` |

pub mod article;

pub use article::{build_client, extract_article_text, fetch_article};
