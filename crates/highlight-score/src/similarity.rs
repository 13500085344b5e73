//! Semantic similarity between candidate sentences and reference highlights.

use std::sync::Arc;

use highlight_core::{Aggregation, Result};
use highlight_infer::EmbedderBackend;
use ndarray::{Array2, Axis};

/// Cosine similarity of every row of `a` against every row of `b`,
/// shape `(a.nrows(), b.nrows())`. Zero-norm rows are similar to nothing.
pub fn cosine_matrix(a: &Array2<f32>, b: &Array2<f32>) -> Array2<f32> {
    let normalize = |m: &Array2<f32>| {
        let mut out = m.clone();
        for mut row in out.axis_iter_mut(Axis(0)) {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
        out
    };
    normalize(a).dot(&normalize(b).t())
}

/// Embedding cosine similarity, reduced per candidate across references.
pub struct SimilarityScorer {
    embedder: Arc<dyn EmbedderBackend>,
    aggregation: Aggregation,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn EmbedderBackend>, aggregation: Aggregation) -> Self {
        Self {
            embedder,
            aggregation,
        }
    }

    /// One value per candidate: its row of the candidates × references
    /// cosine matrix collapsed with the configured aggregation. A candidate
    /// scores 0.0 when there are no references.
    pub fn similarities<C: AsRef<str>, R: AsRef<str>>(
        &self,
        candidates: &[C],
        references: &[R],
    ) -> Result<Vec<f64>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        let cand: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();
        let refs: Vec<&str> = references.iter().map(AsRef::as_ref).collect();

        let cand_emb = self.embedder.embed_batch(&cand)?;
        let ref_emb = self.embedder.embed_batch(&refs)?;
        let cosine = cosine_matrix(&cand_emb, &ref_emb);

        Ok(cosine
            .axis_iter(Axis(0))
            .map(|row| {
                let values: Vec<f64> = row.iter().map(|&v| v as f64).collect();
                self.aggregation.reduce(&values).unwrap_or(0.0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    /// Maps a few known words onto fixed directions.
    struct KeywordEmbedder;

    impl EmbedderBackend for KeywordEmbedder {
        fn embed(&self, text: &str) -> Result<Array1<f32>> {
            Ok(match text {
                t if t.contains("cat") => array![1.0, 0.0],
                t if t.contains("dog") => array![0.0, 1.0],
                t if t.contains("pet") => array![1.0, 1.0],
                t if t.contains("anti") => array![-1.0, 0.0],
                _ => array![0.0, 0.0],
            })
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn scorer(aggregation: Aggregation) -> SimilarityScorer {
        SimilarityScorer::new(Arc::new(KeywordEmbedder), aggregation)
    }

    #[test]
    fn test_cosine_matrix() {
        let a = array![[1.0f32, 0.0], [0.0, 2.0]];
        let b = array![[3.0f32, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let m = cosine_matrix(&a, &b);
        assert_eq!(m.shape(), &[2, 3]);
        assert!((m[[0, 0]] - 1.0).abs() < 1e-6);
        assert!((m[[1, 1]] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert_eq!(m[[0, 2]], 0.0);
    }

    #[test]
    fn test_max_and_average() {
        let refs = ["a cat", "a dog"];
        let max = scorer(Aggregation::Max).similarities(&["cat"], &refs).unwrap();
        assert!((max[0] - 1.0).abs() < 1e-6);

        let avg = scorer(Aggregation::Average).similarities(&["cat"], &refs).unwrap();
        assert!((avg[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_harmonic_guard_on_non_positive_cosine() {
        let refs = ["a cat", "a dog"];
        // cat vs dog is orthogonal (0.0)
        let harm = scorer(Aggregation::Harmonic).similarities(&["cat"], &refs).unwrap();
        assert_eq!(harm, vec![0.0]);

        // pet vs cat and pet vs dog are both 1/sqrt(2)
        let harm = scorer(Aggregation::Harmonic).similarities(&["pet"], &refs).unwrap();
        assert!((harm[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);

        let harm = scorer(Aggregation::Harmonic).similarities(&["anti"], &["cat"]).unwrap();
        assert_eq!(harm, vec![0.0]);
    }

    #[test]
    fn test_one_value_per_candidate() {
        let sims = scorer(Aggregation::Max)
            .similarities(&["cat", "dog", "pet"], &["cat"])
            .unwrap();
        assert_eq!(sims.len(), 3);
        assert!((sims[1] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        assert!(scorer(Aggregation::Max).similarities(&none, &["cat"]).unwrap().is_empty());
        assert_eq!(
            scorer(Aggregation::Max).similarities(&["cat"], &none).unwrap(),
            vec![0.0]
        );
    }
}
