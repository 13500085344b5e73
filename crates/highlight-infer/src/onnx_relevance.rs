//! ONNX sequence classification model used as the sentence relevance scorer.
//!
//! Each input is encoded as the pair `[CLS] sentence [SEP] context [SEP]`;
//! only the context is truncated, so the candidate sentence is always seen
//! whole. The model has a single output label and its logit is the score.
//! Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use highlight_core::{Error, Result};
    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use tokenizers::{
        PaddingParams, PaddingStrategy, Tokenizer, TruncationParams, TruncationStrategy,
    };
    use tracing::{debug, info};

    use crate::relevance::RelevanceModel;

    /// Maximum pair length accepted by the classifier.
    const MAX_SEQ_LEN: usize = 512;

    pub struct OnnxRelevanceModel {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
    }

    impl OnnxRelevanceModel {
        /// Load `model.onnx` and `tokenizer.json` from `model_dir`.
        pub fn load(model_dir: &Path) -> Result<Self> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            for path in [&model_path, &tokenizer_path] {
                if !path.exists() {
                    return Err(Error::Inference(format!(
                        "Relevance model file not found: {}",
                        path.display()
                    )));
                }
            }

            ort::init().commit();

            let session = Session::builder()
                .map_err(|e| Error::Inference(format!("Failed to create session builder: {}", e)))?
                .commit_from_file(&model_path)
                .map_err(|e| Error::Inference(format!("Failed to load ONNX model: {}", e)))?;

            let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| Error::Inference(format!("Failed to load tokenizer: {}", e)))?;
            tokenizer
                .with_truncation(Some(TruncationParams {
                    max_length: MAX_SEQ_LEN,
                    strategy: TruncationStrategy::OnlySecond,
                    ..Default::default()
                }))
                .map_err(|e| Error::Inference(format!("Failed to configure truncation: {}", e)))?;
            tokenizer.with_padding(Some(PaddingParams {
                strategy: PaddingStrategy::BatchLongest,
                ..Default::default()
            }));

            info!("ONNX relevance model loaded: {}", model_path.display());

            Ok(Self {
                session: Mutex::new(session),
                tokenizer,
            })
        }
    }

    impl RelevanceModel for OnnxRelevanceModel {
        fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>> {
            if pairs.is_empty() {
                return Ok(Vec::new());
            }

            let encodings = self
                .tokenizer
                .encode_batch(pairs.to_vec(), true)
                .map_err(|e| Error::Inference(format!("Tokenization failed: {}", e)))?;

            let batch = encodings.len();
            let seq_len = encodings[0].get_ids().len();
            let mut ids = Vec::with_capacity(batch * seq_len);
            let mut mask = Vec::with_capacity(batch * seq_len);
            let mut type_ids = Vec::with_capacity(batch * seq_len);
            for enc in &encodings {
                ids.extend(enc.get_ids().iter().map(|&v| v as i64));
                mask.extend(enc.get_attention_mask().iter().map(|&v| v as i64));
                type_ids.extend(enc.get_type_ids().iter().map(|&v| v as i64));
            }
            debug!("Scoring batch of {} pairs (seq_len={})", batch, seq_len);

            let ids_tensor = Tensor::from_array(([batch, seq_len], ids))
                .map_err(|e| Error::Inference(format!("ids tensor: {}", e)))?;
            let mask_tensor = Tensor::from_array(([batch, seq_len], mask))
                .map_err(|e| Error::Inference(format!("mask tensor: {}", e)))?;
            let type_ids_tensor = Tensor::from_array(([batch, seq_len], type_ids))
                .map_err(|e| Error::Inference(format!("type_ids tensor: {}", e)))?;

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
                .map_err(|e| Error::Inference(format!("ONNX inference failed: {}", e)))?;

            // Logits are [batch, num_labels]; num_labels == 1
            let (_, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Inference(format!("output tensor: {}", e)))?;
            if data.len() % batch != 0 || data.is_empty() {
                return Err(Error::Inference(format!(
                    "logits length {} does not match batch {}",
                    data.len(),
                    batch
                )));
            }
            let stride = data.len() / batch;
            Ok(data.iter().step_by(stride).copied().collect())
        }
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxRelevanceModel;
