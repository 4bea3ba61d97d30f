//! Text normalization and stop-word filtering.
//!
//! This is the only analysis done locally; everything else is delegated to
//! collaborators (the fetcher, the word-cloud renderer, the completion API).
//!
//! ```text
//! ArticleText ──► Normalizer ──► [Token] ──► StopWordSet ──┬─► highlight view
//!                                                          ├─► filtered view
//!                                                          └─► frequency view
//! ```

pub mod normalize;
pub mod pipeline;
pub mod stopwords;

pub use normalize::{Normalizer, Token};
pub use pipeline::{Frequency, TextPipeline, TextViews, TokenAnnotation};
pub use stopwords::{StopWordList, StopWordSet};
