//! Loading saved splits, regenerating the missing ones.

use std::path::Path;
use std::sync::Arc;

use highlight_core::{HighlightConfig, Result};
use highlight_score::LabelScorer;
use highlight_text::{SentenceSplitter, UnicodeSentenceSplitter};
use tracing::{debug, info};

use crate::builder::ExampleBuilder;
use crate::cleaner::TextCleaner;
use crate::records::{SentenceExample, Split};
use crate::store::{RawSource, SplitStore};

/// The three prepared splits.
#[derive(Debug, Clone, Default)]
pub struct PreparedSplits {
    pub train: Vec<SentenceExample>,
    pub validation: Vec<SentenceExample>,
    pub test: Vec<SentenceExample>,
}

impl PreparedSplits {
    pub fn get(&self, split: Split) -> &[SentenceExample] {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.validation,
            Split::Test => &self.test,
        }
    }

    fn set(&mut self, split: Split, rows: Vec<SentenceExample>) {
        match split {
            Split::Train => self.train = rows,
            Split::Validation => self.validation = rows,
            Split::Test => self.test = rows,
        }
    }
}

fn target_count(config: &HighlightConfig, split: Split) -> usize {
    match split {
        Split::Train => config.num_train_examples,
        Split::Validation => config.num_val_examples,
        Split::Test => config.num_test_examples,
    }
}

/// Load splits from `config.dataset_path` when it exists; clean and build
/// the rest from `source`. Regenerated splits are saved when
/// `save_dataset_on_disk` is set, under `dataset_path` or else `save_dir`.
pub fn prepare_dataset(
    config: &HighlightConfig,
    source: &dyn RawSource,
    save_dir: &Path,
) -> Result<PreparedSplits> {
    let mut prepared = PreparedSplits::default();
    let mut missing = Vec::new();

    let saved = config
        .dataset_path
        .as_deref()
        .filter(|p| p.is_dir())
        .map(SplitStore::new);
    for split in Split::ALL {
        match saved.as_ref().map(|store| store.load(split)).transpose()? {
            Some(Some(rows)) => prepared.set(split, rows),
            _ => missing.push(split),
        }
    }

    if missing.is_empty() {
        return Ok(prepared);
    }

    let store = config
        .save_dataset_on_disk
        .then(|| SplitStore::new(config.dataset_path.as_deref().unwrap_or(save_dir)));
    if let Some(store) = &store {
        debug!("Creating folder {} to store the dataset splits", store.dir().display());
        std::fs::create_dir_all(store.dir())?;
    }

    let splitter: Arc<dyn SentenceSplitter> = Arc::new(UnicodeSentenceSplitter);
    let cleaner = TextCleaner::new(splitter.clone());
    let builder = ExampleBuilder::new(splitter, LabelScorer::new(config.aggregation));

    for split in missing {
        info!("Cleaning and parsing {} split", split.as_str().to_uppercase());
        let raw = source.load_split(split)?;
        let cleaned = cleaner.clean(&raw, target_count(config, split), config.seed)?;
        let rows = builder.build_all(&cleaned, split.is_test());
        info!(
            "{} split: {} articles, {} sentences",
            split,
            cleaned.len(),
            rows.len()
        );
        if let Some(store) = &store {
            store.save(split, &rows)?;
        }
        prepared.set(split, rows);
    }

    Ok(prepared)
}
