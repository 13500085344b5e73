//! Ranking of article sentences by predicted relevance to the article.

use std::sync::Arc;

use highlight_core::{Error, Result};
use highlight_infer::RelevanceModel;

/// Sentences ordered by descending score, with their scores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedList {
    pub sentences: Vec<String>,
    pub scores: Vec<f32>,
}

impl RankedList {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Scores (sentence, context) pairs with a relevance model in one batch.
#[derive(Clone)]
pub struct Ranker {
    model: Arc<dyn RelevanceModel>,
}

impl Ranker {
    pub fn new(model: Arc<dyn RelevanceModel>) -> Self {
        Self { model }
    }

    /// Rank `sentences` against `context`. Equal scores keep input order.
    pub fn rank<S: AsRef<str>>(&self, sentences: &[S], context: &str) -> Result<RankedList> {
        if sentences.is_empty() {
            return Ok(RankedList::default());
        }
        let pairs: Vec<(&str, &str)> = sentences.iter().map(|s| (s.as_ref(), context)).collect();
        let scores = self.model.score_batch(&pairs)?;
        if scores.len() != sentences.len() {
            return Err(Error::Inference(format!(
                "relevance model returned {} scores for {} sentences",
                scores.len(),
                sentences.len()
            )));
        }

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        Ok(RankedList {
            sentences: order.iter().map(|&i| sentences[i].as_ref().to_string()).collect(),
            scores: order.iter().map(|&i| scores[i]).collect(),
        })
    }
}
