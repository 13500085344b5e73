//! ROUGE overlap engine.
//!
//! Texts are split into sentences on `.`, sentences into whitespace
//! tokens, with no case folding or stemming. ROUGE-N compares the sets of
//! word n-grams of the whole text; ROUGE-L is the summary-level union LCS.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{RougeScore, ScoreDict};

/// Reasons a candidate/reference pair cannot be scored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RougeError {
    #[error("Hypothesis is empty")]
    EmptyHypothesis,

    #[error("Reference is empty")]
    EmptyReference,

    #[error("Hypothesis has no tokens")]
    NoHypothesisTokens,

    #[error("Reference has no tokens")]
    NoReferenceTokens,
}

/// Lexical overlap between a candidate and a single reference.
pub trait OverlapScorer: Send + Sync {
    fn score(&self, candidate: &str, reference: &str) -> Result<ScoreDict, RougeError>;
}

/// ROUGE-1, ROUGE-2 and ROUGE-L (summary level).
#[derive(Debug, Clone, Copy, Default)]
pub struct Rouge;

impl OverlapScorer for Rouge {
    fn score(&self, candidate: &str, reference: &str) -> Result<ScoreDict, RougeError> {
        let hyp = split_sentences(candidate);
        if hyp.is_empty() {
            return Err(RougeError::EmptyHypothesis);
        }
        let refs = split_sentences(reference);
        if refs.is_empty() {
            return Err(RougeError::EmptyReference);
        }

        Ok(ScoreDict {
            rouge_1: rouge_n(&hyp, &refs, 1),
            rouge_2: rouge_n(&hyp, &refs, 2),
            rouge_l: rouge_l_summary_level(&hyp, &refs)?,
        })
    }
}

/// Sentences with whitespace runs collapsed. Only zero-length pieces
/// between dots are dropped, so a whitespace-only piece survives as "".
fn split_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .filter(|s| !s.is_empty())
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

fn words_of<S: AsRef<str>>(sentences: &[S]) -> Vec<&str> {
    sentences
        .iter()
        .flat_map(|s| s.as_ref().split_whitespace())
        .collect()
}

fn ngrams<'a>(words: &[&'a str], n: usize) -> HashSet<Vec<&'a str>> {
    if words.len() < n {
        return HashSet::new();
    }
    words.windows(n).map(|w| w.to_vec()).collect()
}

fn rouge_n(hyp: &[String], refs: &[String], n: usize) -> RougeScore {
    let hyp_words = words_of(hyp);
    let ref_words = words_of(refs);
    let evaluated = ngrams(&hyp_words, n);
    let reference = ngrams(&ref_words, n);
    let overlap = evaluated.intersection(&reference).count() as f64;

    let p = if evaluated.is_empty() {
        0.0
    } else {
        overlap / evaluated.len() as f64
    };
    let r = if reference.is_empty() {
        0.0
    } else {
        overlap / reference.len() as f64
    };
    let f = 2.0 * ((p * r) / (p + r + 1e-8));
    RougeScore { f, p, r }
}

/// Words of `x` on one longest common subsequence of `x` and `y`.
fn recon_lcs<'a>(x: &[&'a str], y: &[&str]) -> Vec<&'a str> {
    let (n, m) = (x.len(), y.len());
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if x[i - 1] == y[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut out = Vec::with_capacity(table[n][m]);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if x[i - 1] == y[j - 1] {
            out.push(x[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] > table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.reverse();
    out
}

fn rouge_l_summary_level(hyp: &[String], refs: &[String]) -> Result<RougeScore, RougeError> {
    let ref_vocab: HashSet<&str> = words_of(refs).into_iter().collect();
    let hyp_vocab: HashSet<&str> = words_of(hyp).into_iter().collect();
    if hyp_vocab.is_empty() {
        return Err(RougeError::NoHypothesisTokens);
    }
    if ref_vocab.is_empty() {
        return Err(RougeError::NoReferenceTokens);
    }

    // Union LCS words per reference sentence; a word counts only the
    // first time it enters the running union.
    let hyp_sents: Vec<Vec<&str>> = hyp.iter().map(|s| s.split_whitespace().collect()).collect();
    let mut union: HashSet<&str> = HashSet::new();
    let mut llcs = 0usize;
    for ref_s in refs {
        let ref_words: Vec<&str> = ref_s.split_whitespace().collect();
        let before = union.len();
        for hyp_words in &hyp_sents {
            union.extend(recon_lcs(&ref_words, hyp_words));
        }
        llcs += union.len() - before;
    }

    let llcs = llcs as f64;
    let r = llcs / ref_vocab.len() as f64;
    let p = llcs / hyp_vocab.len() as f64;
    let beta = p / (r + 1e-12);
    let num = (1.0 + beta * beta) * r * p;
    let denom = r + beta * beta * p;
    let f = num / (denom + 1e-12);
    Ok(RougeScore { f, p, r })
}
