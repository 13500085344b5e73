//! Sentence embedder trait.
//!
//! The `EmbedderBackend` trait abstracts over embedding generation.
//! `OnnxEmbedder` (feature `onnx`) implements it with all-MiniLM-L6-v2.

use highlight_core::{Error, Result};
use ndarray::{Array1, Array2};

/// Trait for embedding backends.
pub trait EmbedderBackend: Send + Sync {
    /// Generate an embedding for a text string.
    fn embed(&self, text: &str) -> Result<Array1<f32>>;

    /// Generate embeddings for a batch of texts, one row per text.
    fn embed_batch(&self, texts: &[&str]) -> Result<Array2<f32>> {
        let mut matrix = Array2::zeros((texts.len(), self.dimension()));
        for (mut row, text) in matrix.rows_mut().into_iter().zip(texts) {
            let embedding = self.embed(text)?;
            if embedding.len() != row.len() {
                return Err(Error::Inference(format!(
                    "embedding has {} dims, expected {}",
                    embedding.len(),
                    row.len()
                )));
            }
            row.assign(&embedding);
        }
        Ok(matrix)
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    struct LengthEmbedder;

    impl EmbedderBackend for LengthEmbedder {
        fn embed(&self, text: &str) -> Result<Array1<f32>> {
            Ok(array![text.len() as f32, 1.0])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_default_batch_stacks_rows() {
        let m = LengthEmbedder.embed_batch(&["ab", "abcd"]).unwrap();
        assert_eq!(m.shape(), &[2, 2]);
        assert_eq!(m.row(0), array![2.0, 1.0]);
        assert_eq!(m.row(1), array![4.0, 1.0]);
    }

    #[test]
    fn test_empty_batch() {
        let m = LengthEmbedder.embed_batch(&[]).unwrap();
        assert_eq!(m.shape(), &[0, 2]);
    }
}
