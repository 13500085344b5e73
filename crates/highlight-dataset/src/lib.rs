//! Highlight Dataset — raw and cleaned news records, per-sentence examples,
//! and the train/validation/test split store.
//!
//! Raw article/highlights pairs are cleaned once, expanded into one
//! [`SentenceExample`] per article sentence, and persisted as JSON Lines
//! so later runs can skip the cleaning stage.

pub mod builder;
pub mod cleaner;
pub mod prepare;
pub mod records;
pub mod store;

pub use builder::ExampleBuilder;
pub use cleaner::TextCleaner;
pub use prepare::{prepare_dataset, PreparedSplits};
pub use records::{CleanedRecord, RawRecord, SentenceExample, Split};
pub use store::{read_jsonl, write_jsonl, JsonlRawSource, RawSource, SplitStore};
