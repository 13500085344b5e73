//! Record types flowing through dataset preparation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One news article with its reference summary as a single string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub article: String,
    pub highlights: String,
}

/// Article after boilerplate removal, with 3 to 5 accepted highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub article: String,
    pub highlights: Vec<String>,
}

/// One candidate sentence of an article. Rows of the same article share
/// `context` and are stored contiguously.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceExample {
    pub sentence: String,
    pub context: String,
    pub highlights: Vec<String>,
    /// Relevance label; absent on test rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<f64>,
}

/// Named dataset split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Validation => "validation",
            Split::Test => "test",
        }
    }

    /// Test rows carry no scalar label.
    pub fn is_test(&self) -> bool {
        matches!(self, Split::Test)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
