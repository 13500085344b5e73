//! Evaluation of ranked highlights against reference highlights.
//!
//! Every article group is ranked with the relevance model, optionally
//! trigram-blocked, and cut to the top `num_highlight` sentences. The
//! predictions are scored with ROUGE (best-ROUGE-2 reference per
//! sentence) and embedding similarity, then averaged per article and over
//! the whole dataset.

use std::sync::Arc;

use highlight_core::{Aggregation, Error, HighlightConfig, Result};
use highlight_dataset::SentenceExample;
use highlight_infer::{EmbedderBackend, RelevanceModel};
use highlight_score::{compute_avg_dict, mrr_single_doc, LabelScorer, ScoreDict, SimilarityScorer};
use highlight_text::trigram_blocking;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::grouping::{ArticleGroup, GroupStream};
use crate::ranker::Ranker;

/// Scores of one article's predicted highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleScore {
    pub rouge: ScoreDict,
    pub similarity: f64,
    pub mrr: f64,
    pub predicted: Vec<String>,
}

/// Per-article scores and their dataset-level means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub per_article: Vec<ArticleScore>,
    pub aggregate: ScoreDict,
    pub mean_similarity: f64,
    pub mean_mrr: f64,
}

impl EvaluationResult {
    fn from_articles(per_article: Vec<ArticleScore>) -> Result<Self> {
        let rouges: Vec<ScoreDict> = per_article.iter().map(|a| a.rouge).collect();
        let aggregate = compute_avg_dict(&rouges).ok_or(Error::EmptyEvaluation)?;
        let n = per_article.len() as f64;
        let mean_similarity = per_article.iter().map(|a| a.similarity).sum::<f64>() / n;
        let mean_mrr = per_article.iter().map(|a| a.mrr).sum::<f64>() / n;
        Ok(Self {
            per_article,
            aggregate,
            mean_similarity,
            mean_mrr,
        })
    }
}

/// Runs the group state machine over a test split.
pub struct Evaluator {
    ranker: Ranker,
    labels: LabelScorer,
    similarity: SimilarityScorer,
    num_highlight: usize,
    trigram_blocking: bool,
}

impl Evaluator {
    pub fn new(
        relevance: Arc<dyn RelevanceModel>,
        embedder: Arc<dyn EmbedderBackend>,
        num_highlight: usize,
    ) -> Self {
        Self {
            ranker: Ranker::new(relevance),
            labels: LabelScorer::new(Aggregation::Max),
            similarity: SimilarityScorer::new(embedder, Aggregation::Max),
            num_highlight,
            trigram_blocking: false,
        }
    }

    /// Evaluator configured from `num_highlight`, `trigram_blocking` and
    /// `aggregation`. ROUGE always keeps the best-ROUGE-2 reference; the
    /// aggregation reduces each prediction's similarities over references.
    pub fn from_config(
        config: &HighlightConfig,
        relevance: Arc<dyn RelevanceModel>,
        embedder: Arc<dyn EmbedderBackend>,
    ) -> Self {
        Self {
            ranker: Ranker::new(relevance),
            labels: LabelScorer::new(config.aggregation),
            similarity: SimilarityScorer::new(embedder, config.aggregation),
            num_highlight: config.num_highlight,
            trigram_blocking: config.trigram_blocking,
        }
    }

    pub fn with_trigram_blocking(mut self, enabled: bool) -> Self {
        self.trigram_blocking = enabled;
        self
    }

    /// Evaluate a flattened split whose article rows are contiguous.
    pub fn evaluate<'a, I>(&self, rows: I) -> Result<EvaluationResult>
    where
        I: IntoIterator<Item = &'a SentenceExample>,
    {
        let mut stream = GroupStream::new();
        let mut per_article = Vec::new();
        for row in rows {
            if let Some(group) = stream.push(row) {
                per_article.push(self.score_group(group)?);
            }
        }
        if let Some(group) = stream.finish() {
            per_article.push(self.score_group(group)?);
        }

        info!("Evaluated {} articles", per_article.len());
        EvaluationResult::from_articles(per_article)
    }

    /// Rank, filter and score one article. The group is consumed so its
    /// buffers are released before the next article is read.
    fn score_group(&self, group: ArticleGroup) -> Result<ArticleScore> {
        let ranked = self.ranker.rank(&group.sentences, &group.context)?;
        let ranked = if self.trigram_blocking {
            trigram_blocking(&ranked.sentences)
        } else {
            ranked.sentences
        };

        let score = self.evaluate_article(&ranked, &group.highlights)?;
        debug!(
            sentences = group.sentences.len(),
            rouge_2_f = score.rouge.rouge_2.f,
            similarity = score.similarity,
            mrr = score.mrr,
            "Article scored"
        );
        Ok(score)
    }

    /// Score a ranked article against its references. The reciprocal rank
    /// is taken over the whole of `ranked`; ROUGE and similarity are the
    /// means over its first `num_highlight` sentences.
    pub fn evaluate_article(&self, ranked: &[String], references: &[String]) -> Result<ArticleScore> {
        let mrr = mrr_single_doc(ranked, references);
        let predicted = &ranked[..ranked.len().min(self.num_highlight)];
        let rouges: Vec<ScoreDict> = predicted
            .iter()
            .map(|p| self.labels.score_dict(p, references))
            .collect();
        let similarities = self.similarity.similarities(predicted, references)?;
        let similarity = if similarities.is_empty() {
            0.0
        } else {
            similarities.iter().sum::<f64>() / similarities.len() as f64
        };

        Ok(ArticleScore {
            rouge: compute_avg_dict(&rouges).unwrap_or_default(),
            similarity,
            mrr,
            predicted: predicted.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Prefers longer sentences and counts batches.
    struct LengthModel {
        calls: AtomicUsize,
    }

    impl RelevanceModel for LengthModel {
        fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(pairs.iter().map(|(s, _)| s.len() as f32).collect())
        }
    }

    /// Maps every text onto the same direction.
    struct ConstantEmbedder;

    impl EmbedderBackend for ConstantEmbedder {
        fn embed(&self, _text: &str) -> Result<ndarray::Array1<f32>> {
            Ok(ndarray::array![1.0, 0.0])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn row(sentence: &str, context: &str, highlights: &[&str]) -> SentenceExample {
        SentenceExample {
            sentence: sentence.into(),
            context: context.into(),
            highlights: highlights.iter().map(|h| h.to_string()).collect(),
            label: None,
        }
    }

    fn evaluator(num_highlight: usize) -> (Evaluator, Arc<LengthModel>) {
        let model = Arc::new(LengthModel {
            calls: AtomicUsize::new(0),
        });
        let eval = Evaluator::new(model.clone(), Arc::new(ConstantEmbedder), num_highlight);
        (eval, model)
    }

    #[test]
    fn test_one_score_per_group() {
        let rows = [
            row("the cat sat on the mat today", "A", &["the cat sat on the mat"]),
            row("short one", "A", &["the cat sat on the mat"]),
            row("dogs bark", "B", &["birds sing"]),
            row("birds sing in the morning", "B", &["birds sing"]),
            row("rain", "B", &["birds sing"]),
        ];
        let (eval, model) = evaluator(1);
        let result = eval.evaluate(&rows).unwrap();

        assert_eq!(result.per_article.len(), 2);
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert_eq!(result.per_article[0].predicted, vec!["the cat sat on the mat today"]);
        assert_eq!(result.per_article[1].predicted, vec!["birds sing in the morning"]);
        assert_eq!(result.per_article[1].mrr, 1.0);
        assert!((result.mean_similarity - 1.0).abs() < 1e-6);
        assert!(result.aggregate.rouge_2.f > 0.0);
    }

    #[test]
    fn test_aggregate_is_mean_of_articles() {
        let rows = [
            row("alpha beta gamma", "A", &["alpha beta gamma"]),
            row("delta epsilon zeta", "B", &["eta theta iota"]),
        ];
        let (eval, _) = evaluator(3);
        let result = eval.evaluate(&rows).unwrap();
        let a = result.per_article[0].rouge.rouge_1.f;
        let b = result.per_article[1].rouge.rouge_1.f;
        assert!((a - 1.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
        assert!((result.aggregate.rouge_1.f - (a + b) / 2.0).abs() < 1e-12);
        assert!((result.mean_mrr - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_split_is_an_error() {
        let (eval, _) = evaluator(3);
        let rows: Vec<SentenceExample> = Vec::new();
        assert!(matches!(eval.evaluate(&rows), Err(Error::EmptyEvaluation)));
    }

    #[test]
    fn test_trigram_blocking_before_truncation() {
        let rows = [
            row("the president signed the bill into law", "A", &["markets rallied on the news"]),
            row("the president signed the bill", "A", &["markets rallied on the news"]),
            row("markets rallied on the news", "A", &["markets rallied on the news"]),
        ];
        let (plain, _) = evaluator(2);
        let result = plain.evaluate(&rows).unwrap();
        assert_eq!(
            result.per_article[0].predicted,
            vec!["the president signed the bill into law", "the president signed the bill"]
        );

        let (blocking, _) = evaluator(2);
        let result = blocking.with_trigram_blocking(true).evaluate(&rows).unwrap();
        assert_eq!(
            result.per_article[0].predicted,
            vec!["the president signed the bill into law", "markets rallied on the news"]
        );
        assert_eq!(result.per_article[0].mrr, 0.5);
    }

    #[test]
    fn test_evaluate_article_averages_predictions() {
        let (eval, _) = evaluator(3);
        let predicted = vec!["the cat sat".to_string(), "???".to_string()];
        let refs = vec!["the cat sat".to_string()];
        let score = eval.evaluate_article(&predicted, &refs).unwrap();
        // second prediction has no alphabetic characters and scores zero
        assert!((score.rouge.rouge_1.f - 0.5).abs() < 1e-6);
        assert_eq!(score.mrr, 1.0);
    }

    #[test]
    fn test_evaluate_article_ranks_beyond_top_k() {
        let (eval, _) = evaluator(1);
        let ranked = vec!["rain fell all day".to_string(), "the cat sat".to_string()];
        let refs = vec!["the cat sat".to_string()];
        let score = eval.evaluate_article(&ranked, &refs).unwrap();
        assert_eq!(score.predicted, vec!["rain fell all day"]);
        assert_eq!(score.mrr, 0.5);
    }

    /// One axis per animal word.
    struct AnimalEmbedder;

    impl EmbedderBackend for AnimalEmbedder {
        fn embed(&self, text: &str) -> Result<ndarray::Array1<f32>> {
            Ok(if text.contains("cat") {
                ndarray::array![1.0, 0.0]
            } else {
                ndarray::array![0.0, 1.0]
            })
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_config_aggregation_reaches_similarity() {
        let model = Arc::new(LengthModel {
            calls: AtomicUsize::new(0),
        });
        let predicted = vec!["the cat sat".to_string()];
        let refs = vec!["a cat slept".to_string(), "a dog barked".to_string()];

        let max = Evaluator::from_config(&HighlightConfig::default(), model.clone(), Arc::new(AnimalEmbedder));
        let score = max.evaluate_article(&predicted, &refs).unwrap();
        assert!((score.similarity - 1.0).abs() < 1e-6);

        let config = HighlightConfig {
            aggregation: Aggregation::Average,
            ..Default::default()
        };
        let average = Evaluator::from_config(&config, model, Arc::new(AnimalEmbedder));
        let score = average.evaluate_article(&predicted, &refs).unwrap();
        assert!((score.similarity - 0.5).abs() < 1e-6);
    }
}
