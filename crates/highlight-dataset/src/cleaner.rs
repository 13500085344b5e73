//! Cleaning of raw article/highlights pairs.

use std::sync::Arc;

use highlight_core::{Error, Result};
use highlight_text::{clean_article, clean_highlights, SentenceSplitter};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::records::{CleanedRecord, RawRecord};

/// Filters and normalizes raw records.
pub struct TextCleaner {
    splitter: Arc<dyn SentenceSplitter>,
}

impl TextCleaner {
    pub fn new(splitter: Arc<dyn SentenceSplitter>) -> Self {
        Self { splitter }
    }

    /// Clean one record, or `None` if any filter rejects it.
    pub fn clean_record(&self, raw: &RawRecord) -> Option<CleanedRecord> {
        let highlights = clean_highlights(&raw.highlights, self.splitter.as_ref())?;
        let article = clean_article(&raw.article)?;
        Some(CleanedRecord {
            article,
            highlights,
        })
    }

    /// Visit `raw` in a seeded shuffle order and collect exactly
    /// `target_count` accepted records.
    pub fn clean(
        &self,
        raw: &[RawRecord],
        target_count: usize,
        seed: u64,
    ) -> Result<Vec<CleanedRecord>> {
        let mut order: Vec<usize> = (0..raw.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        let mut cleaned = Vec::with_capacity(target_count);
        let mut rejected = 0usize;
        for idx in order {
            if cleaned.len() == target_count {
                break;
            }
            match self.clean_record(&raw[idx]) {
                Some(record) => cleaned.push(record),
                None => rejected += 1,
            }
        }

        if cleaned.len() < target_count {
            return Err(Error::SourceExhausted {
                wanted: target_count,
                accepted: cleaned.len(),
            });
        }
        debug!(
            "Cleaned {} records ({} rejected) from {} raw",
            cleaned.len(),
            rejected,
            raw.len()
        );
        Ok(cleaned)
    }
}
