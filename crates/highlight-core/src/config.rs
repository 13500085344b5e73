//! Run configuration and output directory management.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::aggregation::Aggregation;
use crate::error::{Error, Result};

/// Paths for a single timestamped run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPaths {
    /// Run directory (`<output_dir>/<YYYY-mm-dd_HH-MM-SS>`).
    pub root: PathBuf,
    /// Log files (`<root>/logs/`).
    pub logs: PathBuf,
    /// Default location for saved dataset splits (`<root>/dataset/`).
    pub dataset: PathBuf,
    /// Evaluation report (`<root>/evaluation.json`).
    pub report: PathBuf,
}

impl RunPaths {
    /// Derive run paths from the output directory and the run start time.
    /// Nothing is created on disk.
    pub fn new(output_dir: impl AsRef<Path>, started_at: DateTime<Local>) -> Self {
        let root = output_dir
            .as_ref()
            .join(started_at.format("%Y-%m-%d_%H-%M-%S").to_string());
        Self {
            logs: root.join("logs"),
            dataset: root.join("dataset"),
            report: root.join("evaluation.json"),
            root,
        }
    }

    /// Create the logs directory. Refuses to reuse an existing one so
    /// artifacts of a previous run are never overwritten.
    pub fn create_logs_dir(&self) -> Result<()> {
        if self.logs.exists() {
            return Err(Error::Config(format!(
                "{} already exists!",
                self.logs.display()
            )));
        }
        std::fs::create_dir_all(&self.logs)?;
        Ok(())
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Directory holding previously saved splits (`train.jsonl`, ...).
    pub dataset_path: Option<PathBuf>,
    /// Directory with the canonical raw article/highlights splits.
    pub raw_source_dir: PathBuf,
    /// Parent directory for timestamped runs.
    pub output_dir: PathBuf,
    pub num_train_examples: usize,
    pub num_val_examples: usize,
    pub num_test_examples: usize,
    /// Seed for the deterministic shuffle of the raw source.
    pub seed: u64,
    /// Persist regenerated splits.
    pub save_dataset_on_disk: bool,
    /// Aggregation across reference highlights, for labels and similarity.
    pub aggregation: Aggregation,
    /// Number of top-ranked sentences kept per article at evaluation.
    pub num_highlight: usize,
    /// Run trigram blocking on the ranked list before top-k truncation.
    pub trigram_blocking: bool,
    /// Sequence classification model (`model.onnx` + `tokenizer.json`).
    pub relevance_model_dir: PathBuf,
    /// Sentence embedding model (`model.onnx` + `tokenizer.json`).
    pub embedding_model_dir: PathBuf,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            raw_source_dir: PathBuf::from("data/cnn_dailymail"),
            output_dir: PathBuf::from("runs"),
            num_train_examples: 3000,
            num_val_examples: 500,
            num_test_examples: 500,
            seed: 42,
            save_dataset_on_disk: false,
            aggregation: Aggregation::Max,
            num_highlight: 3,
            trigram_blocking: false,
            relevance_model_dir: PathBuf::from("models/relevance"),
            embedding_model_dir: PathBuf::from("models/all-MiniLM-L6-v2"),
        }
    }
}

impl HighlightConfig {
    /// Load configuration: optional JSON file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                serde_json::from_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HIGHLIGHT_*` overrides from the given lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(seed) = lookup("HIGHLIGHT_SEED") {
            self.seed = parse_var("HIGHLIGHT_SEED", &seed)?;
        }
        if let Some(dir) = lookup("HIGHLIGHT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("HIGHLIGHT_DATASET_PATH") {
            self.dataset_path = Some(PathBuf::from(dir));
        }
        if let Some(k) = lookup("HIGHLIGHT_NUM_HIGHLIGHT") {
            self.num_highlight = parse_var("HIGHLIGHT_NUM_HIGHLIGHT", &k)?;
        }
        if let Some(agg) = lookup("HIGHLIGHT_AGGREGATION") {
            self.aggregation = agg.parse()?;
        }
        Ok(())
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.num_highlight == 0 {
            return Err(Error::Config("num_highlight must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{}: cannot parse '{}'", key, value)))
}
