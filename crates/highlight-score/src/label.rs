//! Relevance labels for candidate sentences against reference highlights.
//!
//! Training rows get a scalar label: the ROUGE-2 F1 against each
//! highlight, collapsed with the configured [`Aggregation`]. Test rows keep
//! the full [`ScoreDict`] of the single highlight with the best ROUGE-2 F1.

use highlight_core::Aggregation;
use highlight_text::has_alphabetic;
use tracing::debug;

use crate::rouge::{OverlapScorer, Rouge};
use crate::types::ScoreDict;

/// Which label shape to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Scalar ROUGE-2 F1, aggregated across references.
    Train,
    /// Full score dict of the best ROUGE-2 reference.
    Test,
}

/// A computed label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Label {
    Scalar(f64),
    Full(ScoreDict),
}

/// Scores candidate sentences against reference highlights.
pub struct LabelScorer {
    overlap: Box<dyn OverlapScorer>,
    aggregation: Aggregation,
}

impl LabelScorer {
    /// ROUGE-backed scorer with the given aggregation policy.
    pub fn new(aggregation: Aggregation) -> Self {
        Self::with_overlap(Box::new(Rouge), aggregation)
    }

    pub fn with_overlap(overlap: Box<dyn OverlapScorer>, aggregation: Aggregation) -> Self {
        Self {
            overlap,
            aggregation,
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Label one candidate in the requested mode.
    pub fn score<R: AsRef<str>>(&self, candidate: &str, references: &[R], mode: ScoringMode) -> Label {
        match mode {
            ScoringMode::Train => Label::Scalar(self.label(candidate, references)),
            ScoringMode::Test => Label::Full(self.score_dict(candidate, references)),
        }
    }

    /// Label every candidate, in order.
    pub fn score_batch<C: AsRef<str>, R: AsRef<str>>(
        &self,
        candidates: &[C],
        references: &[R],
        mode: ScoringMode,
    ) -> Vec<Label> {
        candidates
            .iter()
            .map(|c| self.score(c.as_ref(), references, mode))
            .collect()
    }

    /// Scalar training label in [0, 1].
    pub fn label<R: AsRef<str>>(&self, candidate: &str, references: &[R]) -> f64 {
        if is_degenerate(candidate) {
            return 0.0;
        }
        let per_reference: Vec<f64> = references
            .iter()
            .map(|r| {
                self.overlap_or_zero(candidate, r.as_ref(), references)
                    .rouge_2
                    .f
            })
            .collect();
        self.aggregation.reduce(&per_reference).unwrap_or(0.0)
    }

    /// Score dict of the reference with the highest ROUGE-2 F1.
    pub fn score_dict<R: AsRef<str>>(&self, candidate: &str, references: &[R]) -> ScoreDict {
        if is_degenerate(candidate) {
            return ScoreDict::zero();
        }
        let per_reference: Vec<ScoreDict> = references
            .iter()
            .map(|r| self.overlap_or_zero(candidate, r.as_ref(), references))
            .collect();
        select_best_by_rouge_2(&per_reference).unwrap_or_default()
    }

    fn overlap_or_zero<R: AsRef<str>>(
        &self,
        candidate: &str,
        reference: &str,
        references: &[R],
    ) -> ScoreDict {
        match self.overlap.score(candidate, reference) {
            Ok(scores) => scores,
            Err(e) => {
                debug!(
                    candidate,
                    reference,
                    references = references.len(),
                    "ROUGE error ({}), scoring as zero",
                    e
                );
                ScoreDict::zero()
            }
        }
    }
}

/// Empty, whitespace-only, or free of alphabetic characters.
fn is_degenerate(candidate: &str) -> bool {
    candidate.trim().is_empty() || !has_alphabetic(candidate)
}

/// The dict with the highest ROUGE-2 F1; ties go to the later entry.
pub fn select_best_by_rouge_2(scores: &[ScoreDict]) -> Option<ScoreDict> {
    let mut best: Option<ScoreDict> = None;
    let mut best_f = 0.0;
    for s in scores {
        if s.rouge_2.f >= best_f {
            best_f = s.rouge_2.f;
            best = Some(*s);
        }
    }
    best
}
