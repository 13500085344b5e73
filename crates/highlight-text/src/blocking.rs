//! Trigram blocking: greedy redundancy filter over a ranked sentence list.

use std::collections::HashSet;

/// Lower-cased, whitespace-tokenized word trigram.
pub type Trigram = [String; 3];

/// Word trigrams of a sentence. Fewer than three words yields an empty set.
pub fn trigrams(sentence: &str) -> HashSet<Trigram> {
    let lowered = sentence.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    words
        .windows(3)
        .map(|w| [w[0].to_string(), w[1].to_string(), w[2].to_string()])
        .collect()
}

/// Running trigram set of sentences accepted so far.
#[derive(Debug, Default)]
pub struct RedundancyFilter {
    seen: HashSet<Trigram>,
}

impl RedundancyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `sentence` iff none of its trigrams was seen before; on
    /// acceptance its trigrams join the running set.
    pub fn admit(&mut self, sentence: &str) -> bool {
        let grams = trigrams(sentence);
        if grams.iter().any(|g| self.seen.contains(g)) {
            return false;
        }
        self.seen.extend(grams);
        true
    }
}

/// Greedy, order-preserving trigram blocking over ranked sentences.
pub fn trigram_blocking<S: AsRef<str> + Clone>(ranked: &[S]) -> Vec<S> {
    let mut filter = RedundancyFilter::new();
    ranked
        .iter()
        .filter(|s| filter.admit(s.as_ref()))
        .cloned()
        .collect()
}
