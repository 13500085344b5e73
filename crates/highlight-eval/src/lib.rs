//! Highlight Eval — relevance ranking of article sentences and evaluation
//! of the top-ranked ones against reference highlights.

pub mod evaluator;
pub mod grouping;
pub mod ranker;

pub use evaluator::{ArticleScore, EvaluationResult, Evaluator};
pub use grouping::{ArticleGroup, GroupStream};
pub use ranker::{RankedList, Ranker};
