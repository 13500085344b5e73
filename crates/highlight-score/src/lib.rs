//! Highlight Score — ROUGE overlap, relevance labels, semantic similarity,
//! and rank-quality metrics for extractive summaries.

pub mod fuzzy;
pub mod label;
pub mod rouge;
pub mod similarity;
pub mod types;

pub use fuzzy::{is_similar_string, mrr_single_doc, sequence_ratio};
pub use label::{select_best_by_rouge_2, Label, LabelScorer, ScoringMode};
pub use rouge::{OverlapScorer, Rouge, RougeError};
pub use similarity::{cosine_matrix, SimilarityScorer};
pub use types::{compute_avg_dict, RougeScore, ScoreDict};
