//! Grouping of the flattened sentence stream into articles.
//!
//! Rows of one article are recognised only by being adjacent and sharing
//! the same `context`. Reordered input silently splits or merges articles.

use highlight_dataset::SentenceExample;

/// Sentences of one article with its context and reference highlights.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleGroup {
    pub context: String,
    pub highlights: Vec<String>,
    pub sentences: Vec<String>,
}

impl ArticleGroup {
    fn open(row: &SentenceExample) -> Self {
        Self {
            context: row.context.clone(),
            highlights: row.highlights.clone(),
            sentences: vec![row.sentence.clone()],
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    NoGroup,
    InGroup(ArticleGroup),
}

/// Streaming group-by-adjacent-context.
///
/// [`push`](Self::push) returns the previous group when the context
/// changes; [`finish`](Self::finish) consumes the stream and returns the
/// last open group.
#[derive(Debug, Default)]
pub struct GroupStream {
    state: State,
}

impl GroupStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: &SentenceExample) -> Option<ArticleGroup> {
        if let State::InGroup(group) = &mut self.state {
            if group.context == row.context {
                group.sentences.push(row.sentence.clone());
                return None;
            }
        }
        match std::mem::replace(&mut self.state, State::InGroup(ArticleGroup::open(row))) {
            State::InGroup(closed) => Some(closed),
            State::NoGroup => None,
        }
    }

    pub fn finish(self) -> Option<ArticleGroup> {
        match self.state {
            State::InGroup(group) => Some(group),
            State::NoGroup => None,
        }
    }
}
