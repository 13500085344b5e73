//! Highlight Infer — sentence embedder and relevance classifier seams.
//!
//! Both models are opaque to the pipeline: `EmbedderBackend` maps text to
//! vectors, `RelevanceModel` maps (sentence, context) pairs to logits.
//! With the `onnx` feature, `OnnxEmbedder` and `OnnxRelevanceModel` load
//! exported SentenceTransformers / sequence classification models.

pub mod cache;
pub mod embedder;
pub mod onnx_embedder;
pub mod onnx_relevance;
pub mod relevance;

pub use cache::EmbeddingCache;
pub use embedder::EmbedderBackend;
pub use relevance::RelevanceModel;

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;
#[cfg(feature = "onnx")]
pub use onnx_relevance::OnnxRelevanceModel;

use std::path::Path;
use std::sync::Arc;

use highlight_core::Result;

/// Load the sentence embedder from the given model directory.
pub fn create_embedder(model_dir: &Path) -> Result<Arc<dyn EmbedderBackend>> {
    #[cfg(feature = "onnx")]
    {
        let embedder = OnnxEmbedder::load(model_dir)?;
        tracing::info!("Using ONNX embedder (dim={})", embedder.dimension());
        Ok(Arc::new(embedder))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(highlight_core::Error::Inference(format!(
            "ONNX feature disabled; cannot load embedder from {}",
            model_dir.display()
        )))
    }
}

/// Load the relevance classifier from the given model directory.
pub fn create_relevance_model(model_dir: &Path) -> Result<Arc<dyn RelevanceModel>> {
    #[cfg(feature = "onnx")]
    {
        let model = OnnxRelevanceModel::load(model_dir)?;
        tracing::info!("Using ONNX relevance model from {}", model_dir.display());
        Ok(Arc::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(highlight_core::Error::Inference(format!(
            "ONNX feature disabled; cannot load relevance model from {}",
            model_dir.display()
        )))
    }
}

#[cfg(all(test, not(feature = "onnx")))]
mod tests {
    use super::*;
    use highlight_core::Error;

    #[test]
    fn test_models_unavailable_without_onnx() {
        let dir = Path::new("models/missing");
        assert!(matches!(create_embedder(dir), Err(Error::Inference(_))));
        assert!(matches!(create_relevance_model(dir), Err(Error::Inference(_))));
    }
}
