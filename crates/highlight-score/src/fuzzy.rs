//! Fuzzy string matching and mean reciprocal rank of predicted highlights.

use std::collections::HashMap;

/// Minimum [`sequence_ratio`] for two strings to count as the same sentence.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Sequences at least this long get their popular elements excluded from
/// match seeding.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Longest matching block of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(i, j, size)`. Seeds come from `b2j`; the block is then extended over
/// any equal neighbours, including popular elements missing from `b2j`.
fn longest_match(
    a: &[char],
    b: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    (alo, ahi, blo, bhi): (usize, usize, usize, usize),
) -> (usize, usize, usize) {
    let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > bestsize {
                    besti = i + 1 - k;
                    bestj = j + 1 - k;
                    bestsize = k;
                }
            }
        }
        j2len = next;
    }

    while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
        besti -= 1;
        bestj -= 1;
        bestsize += 1;
    }
    while besti + bestsize < ahi && bestj + bestsize < bhi && a[besti + bestsize] == b[bestj + bestsize]
    {
        bestsize += 1;
    }
    (besti, bestj, bestsize)
}

/// Similarity ratio `2 * M / (len(a) + len(b))`, where `M` is the number
/// of characters in recursively found longest matching blocks. Two empty
/// strings have ratio 1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }
    if b.len() >= AUTOJUNK_MIN_LEN {
        let popular = b.len() / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= popular);
    }

    let mut matched = 0usize;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some(range) = queue.pop() {
        let (alo, ahi, blo, bhi) = range;
        let (i, j, k) = longest_match(&a, &b, &b2j, range);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    2.0 * matched as f64 / total as f64
}

/// Substring containment in either direction, or a ratio of at least
/// [`SIMILARITY_THRESHOLD`].
pub fn is_similar_string(a: &str, b: &str) -> bool {
    if a.contains(b) || b.contains(a) {
        return true;
    }
    sequence_ratio(a, b) >= SIMILARITY_THRESHOLD
}

/// Best reciprocal rank over references: for each reference, the 1-based
/// position of the first predicted sentence that matches it. 0.0 when no
/// reference is matched.
pub fn mrr_single_doc<P: AsRef<str>, R: AsRef<str>>(predicted: &[P], references: &[R]) -> f64 {
    references
        .iter()
        .filter_map(|reference| {
            predicted
                .iter()
                .position(|p| is_similar_string(p.as_ref(), reference.as_ref()))
                .map(|idx| 1.0 / (idx + 1) as f64)
        })
        .fold(0.0, f64::max)
}
