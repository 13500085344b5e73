//! Error types for the highlight pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Raw source exhausted: wanted {wanted} records, accepted {accepted}")]
    SourceExhausted { wanted: usize, accepted: usize },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Evaluation produced no article groups")]
    EmptyEvaluation,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
