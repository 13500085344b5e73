//! Expansion of cleaned articles into per-sentence examples.

use std::sync::Arc;

use highlight_score::LabelScorer;
use highlight_text::SentenceSplitter;

use crate::records::{CleanedRecord, SentenceExample};

/// Builds one [`SentenceExample`] per article sentence.
pub struct ExampleBuilder {
    splitter: Arc<dyn SentenceSplitter>,
    scorer: LabelScorer,
}

impl ExampleBuilder {
    pub fn new(splitter: Arc<dyn SentenceSplitter>, scorer: LabelScorer) -> Self {
        Self { splitter, scorer }
    }

    /// Rows for one article, in sentence order. Training rows are labelled
    /// against the highlights; test rows are left unlabelled.
    pub fn build(&self, record: &CleanedRecord, is_test: bool) -> Vec<SentenceExample> {
        self.splitter
            .split(&record.article)
            .into_iter()
            .map(|sentence| {
                let label = (!is_test).then(|| self.scorer.label(&sentence, &record.highlights));
                SentenceExample {
                    sentence,
                    context: record.article.clone(),
                    highlights: record.highlights.clone(),
                    label,
                }
            })
            .collect()
    }

    /// Flattened rows for many articles; each article's rows stay contiguous.
    pub fn build_all(&self, records: &[CleanedRecord], is_test: bool) -> Vec<SentenceExample> {
        records
            .iter()
            .flat_map(|record| self.build(record, is_test))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use highlight_core::Aggregation;
    use highlight_text::UnicodeSentenceSplitter;

    fn record() -> CleanedRecord {
        CleanedRecord {
            article: "The cat sat on the mat. Stocks fell sharply today. 42.".into(),
            highlights: vec!["the cat sat on the mat".into(), "markets were calm".into()],
        }
    }

    fn builder() -> ExampleBuilder {
        ExampleBuilder::new(
            Arc::new(UnicodeSentenceSplitter),
            LabelScorer::new(Aggregation::Max),
        )
    }

    #[test]
    fn test_one_row_per_sentence_sharing_context() {
        let rows = builder().build(&record(), false);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.context == record().article));
        assert!(rows.iter().all(|r| r.highlights.len() == 2));
        assert_eq!(rows[0].sentence, "The cat sat on the mat.");
    }

    #[test]
    fn test_train_labels() {
        let rows = builder().build(&record(), false);
        // "The cat" is capitalised, but "cat sat", "sat on", "on the" still overlap
        assert!(rows[0].label.unwrap() > 0.0);
        assert_eq!(rows[1].label, Some(0.0));
        // no alphabetic character
        assert_eq!(rows[2].label, Some(0.0));
    }

    #[test]
    fn test_test_rows_unlabelled() {
        let rows = builder().build(&record(), true);
        assert!(rows.iter().all(|r| r.label.is_none()));
    }

    #[test]
    fn test_build_all_keeps_articles_contiguous() {
        let other = CleanedRecord {
            article: "A different story. With two sentences.".into(),
            highlights: vec!["a different story".into()],
        };
        let rows = builder().build_all(&[record(), other.clone()], true);
        assert_eq!(rows.len(), 5);
        let contexts: Vec<&str> = rows.iter().map(|r| r.context.as_str()).collect();
        assert_eq!(contexts[..3], [record().article.as_str(); 3]);
        assert_eq!(contexts[3..], [other.article.as_str(); 2]);
    }
}
