//! Relevance classifier trait.

use highlight_core::Result;

/// Scores how summary-worthy a sentence is with respect to its article.
///
/// One logit per `(sentence, context)` pair, in input order. Stateless
/// per call and deterministic for fixed weights.
pub trait RelevanceModel: Send + Sync {
    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>>;
}
