//! ONNX sentence embedder (all-MiniLM-L6-v2).
//!
//! Loads a SentenceTransformers ONNX export and its tokenizer to produce
//! 384-dimensional float32 embeddings. Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use highlight_core::{Error, Result};
    use ndarray::{Array1, ArrayView2};
    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use tokenizers::Tokenizer;
    use tracing::info;

    use crate::cache::EmbeddingCache;
    use crate::embedder::EmbedderBackend;

    /// Maximum sequence length for the model.
    const MAX_SEQ_LEN: usize = 256;

    /// Embedding dimension of all-MiniLM-L6-v2.
    const DEFAULT_DIM: usize = 384;

    pub struct OnnxEmbedder {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        cache: EmbeddingCache,
        dimension: usize,
    }

    impl OnnxEmbedder {
        /// Load `model.onnx` and `tokenizer.json` from `model_dir`.
        pub fn load(model_dir: &Path) -> Result<Self> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(Error::Inference(format!(
                    "Model not found: {}",
                    model_path.display()
                )));
            }
            if !tokenizer_path.exists() {
                return Err(Error::Inference(format!(
                    "Tokenizer not found: {}",
                    tokenizer_path.display()
                )));
            }

            // With load-dynamic, ORT_DYLIB_PATH must point to libonnxruntime
            ort::init().commit();

            let session = Session::builder()
                .map_err(|e| Error::Inference(format!("Failed to create session builder: {}", e)))?
                .with_intra_threads(2)
                .map_err(|e| Error::Inference(format!("Failed to set threads: {}", e)))?
                .commit_from_file(&model_path)
                .map_err(|e| Error::Inference(format!("Failed to load ONNX model: {}", e)))?;

            let tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| Error::Inference(format!("Failed to load tokenizer: {}", e)))?;

            info!(
                "ONNX embedder loaded: dim={}, model={}",
                DEFAULT_DIM,
                model_path.display()
            );

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
                cache: EmbeddingCache::default(),
                dimension: DEFAULT_DIM,
            })
        }

        fn infer(&self, text: &str) -> Result<Array1<f32>> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| Error::Inference(format!("Tokenization failed: {}", e)))?;

            let seq_len = encoding.get_ids().len().min(MAX_SEQ_LEN);
            let input_ids = &encoding.get_ids()[..seq_len];
            let attention_mask = &encoding.get_attention_mask()[..seq_len];

            let ids_data: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
            let mask_data: Vec<i64> = attention_mask.iter().map(|&m| m as i64).collect();
            let type_ids_data: Vec<i64> = vec![0i64; seq_len];

            let ids_tensor = Tensor::from_array(([1usize, seq_len], ids_data))
                .map_err(|e| Error::Inference(format!("ids tensor: {}", e)))?;
            let mask_tensor = Tensor::from_array(([1usize, seq_len], mask_data))
                .map_err(|e| Error::Inference(format!("mask tensor: {}", e)))?;
            let type_ids_tensor = Tensor::from_array(([1usize, seq_len], type_ids_data))
                .map_err(|e| Error::Inference(format!("type_ids tensor: {}", e)))?;

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
                .map_err(|e| Error::Inference(format!("ONNX inference failed: {}", e)))?;

            // Either token embeddings [1, tokens, dim] or pooled [1, dim]
            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Inference(format!("output tensor: {}", e)))?;
            let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();

            match dims.as_slice() {
                [1, tokens, dim] => {
                    let hidden = ArrayView2::from_shape((*tokens, *dim), data)
                        .map_err(|e| Error::Inference(format!("output shape: {}", e)))?;
                    mean_pool(hidden, attention_mask)
                }
                [1, dim] => Ok(Array1::from_vec(data[..*dim].to_vec())),
                _ => Err(Error::Inference(format!(
                    "Unexpected output shape: {:?}",
                    dims
                ))),
            }
        }
    }

    /// Average of the token rows whose attention mask is set.
    fn mean_pool(hidden: ArrayView2<'_, f32>, mask: &[u32]) -> Result<Array1<f32>> {
        let mut pooled = Array1::<f32>::zeros(hidden.ncols());
        let mut count = 0.0f32;
        for (row, _) in hidden.rows().into_iter().zip(mask).filter(|(_, m)| **m > 0) {
            pooled += &row;
            count += 1.0;
        }
        if count == 0.0 {
            return Err(Error::Inference("empty attention mask".into()));
        }
        Ok(pooled / count)
    }

    impl EmbedderBackend for OnnxEmbedder {
        fn embed(&self, text: &str) -> Result<Array1<f32>> {
            if let Some(cached) = self.cache.get(text) {
                return Ok(cached);
            }
            let embedding = self.infer(text)?;
            self.cache.put(text.to_string(), embedding.clone());
            Ok(embedding)
        }

        fn dimension(&self) -> usize {
            self.dimension
        }
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxEmbedder;
