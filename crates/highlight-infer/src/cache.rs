//! LRU cache for sentence embeddings.
//!
//! Evaluation re-encodes the same reference highlights once per predicted
//! sentence; caching by text avoids repeated forward passes. Model weights
//! are fixed for a run, so entries never expire, only get evicted.

use std::collections::{HashMap, VecDeque};

use ndarray::Array1;
use parking_lot::Mutex;

/// Thread-safe LRU embedding cache keyed by input text.
pub struct EmbeddingCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Array1<f32>>,
    /// Least recently used at the front.
    order: VecDeque<String>,
    max_size: usize,
    hits: u64,
    misses: u64,
}

impl CacheInner {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

impl EmbeddingCache {
    /// Create a cache holding at most `max_size` embeddings.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: VecDeque::with_capacity(max_size),
                max_size,
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Cached embedding for `text`, if present.
    pub fn get(&self, text: &str) -> Option<Array1<f32>> {
        let mut inner = self.inner.lock();
        match inner.entries.get(text).cloned() {
            Some(embedding) => {
                inner.hits += 1;
                inner.touch(text);
                Some(embedding)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert an embedding, evicting the least recently used entry when full.
    pub fn put(&self, text: String, embedding: Array1<f32>) {
        let mut inner = self.inner.lock();
        if inner.max_size == 0 {
            return;
        }

        if inner.entries.insert(text.clone(), embedding).is_some() {
            inner.touch(&text);
            return;
        }

        while inner.entries.len() > inner.max_size {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
        inner.order.push_back(text);
    }

    /// Number of cached embeddings.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) since creation or the last `clear`.
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.inner.lock();
        (inner.hits, inner.misses)
    }

    /// Drop all entries and reset counters.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
        inner.hits = 0;
        inner.misses = 0;
    }
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new(4096)
    }
}
