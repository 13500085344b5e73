//! Highlight Text — sentence splitting, cleaning heuristics, trigram blocking.

pub mod blocking;
pub mod clean;
pub mod splitter;
pub mod words;

pub use blocking::{trigram_blocking, trigrams, RedundancyFilter};
pub use clean::{clean_article, clean_highlights, strip_boilerplate, trim_leading_fragments};
pub use splitter::{SentenceSplitter, UnicodeSentenceSplitter};
pub use words::{has_alphabetic, has_numeric};
