//! Article and highlight cleaning heuristics for news data.
//!
//! Articles often start with a dateline or byline (`LONDON, England (CNN) --`,
//! `By . Staff Reporter . PUBLISHED: . 12:00 .`) that is not part of the
//! story. Highlights are split into sentences and fragments are dropped.

use std::ops::RangeInclusive;

use crate::splitter::SentenceSplitter;
use crate::words::{has_alphabetic, has_numeric};

/// Accepted number of cleaned highlights per article.
pub const HIGHLIGHT_COUNT_RANGE: RangeInclusive<usize> = 3..=5;
/// A highlight needs strictly more space-separated words than this.
pub const MIN_HIGHLIGHT_WORDS: usize = 3;
/// Longest prefix (in characters) treated as boilerplate before a marker.
pub const BOILERPLATE_MAX_PREFIX: usize = 40;
/// Articles shorter than this (in characters) after cleaning are discarded.
pub const MIN_ARTICLE_CHARS: usize = 300;

const BOILERPLATE_MARKERS: [&str; 2] = ["--", "(CNN)"];

/// Split and filter highlight text. Returns `None` when the number of
/// surviving highlights falls outside [`HIGHLIGHT_COUNT_RANGE`].
pub fn clean_highlights(highlights: &str, splitter: &dyn SentenceSplitter) -> Option<Vec<String>> {
    let kept: Vec<String> = splitter
        .split(highlights)
        .into_iter()
        .filter(|h| h.split(' ').count() > MIN_HIGHLIGHT_WORDS && has_alphabetic(h))
        .map(|h| h.replace('\n', "").trim().to_string())
        .collect();

    HIGHLIGHT_COUNT_RANGE.contains(&kept.len()).then_some(kept)
}

/// Drop a short leading prefix up to and including `--`, then the same
/// for `(CNN)`. Each marker is checked once, at its first occurrence.
pub fn strip_boilerplate(article: &str) -> &str {
    let mut article = article;
    for marker in BOILERPLATE_MARKERS {
        if let Some((before, after)) = article.split_once(marker) {
            if before.chars().count() <= BOILERPLATE_MAX_PREFIX {
                article = after;
            }
        }
    }
    article
}

/// Skip `.`-separated fragments until the first one with more than two
/// words free of digits; the article restarts there. Returns the input
/// unchanged when no fragment qualifies.
pub fn trim_leading_fragments(article: &str) -> String {
    let segments: Vec<&str> = article.split('.').collect();
    let start = segments.iter().position(|seg| {
        seg.split_whitespace()
            .filter(|w| !has_numeric(w))
            .count()
            > 2
    });

    match start {
        Some(j) => segments[j..].join(".").trim().to_string(),
        None => article.to_string(),
    }
}

/// Full article cleanup. Returns `None` if the result is too short.
pub fn clean_article(article: &str) -> Option<String> {
    let article = trim_leading_fragments(strip_boilerplate(article));
    (article.chars().count() >= MIN_ARTICLE_CHARS).then_some(article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::UnicodeSentenceSplitter;

    fn body() -> String {
        "The storm moved slowly across the coast on Tuesday night. ".repeat(8)
    }

    #[test]
    fn test_highlights_in_range() {
        let text = "Storm hits the coast hard .\nThousands lose power overnight .\nOfficials urge residents to stay home .";
        let cleaned = clean_highlights(text, &UnicodeSentenceSplitter).unwrap();
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[0], "Storm hits the coast hard .");
    }

    #[test]
    fn test_short_and_numeric_highlights_dropped() {
        // Only two highlights survive: "Too short ." and "12 34 56 78 ." are dropped
        let text = "Storm hits the coast hard .\nToo short .\n12 34 56 78 .\nOfficials urge residents to stay home .";
        assert!(clean_highlights(text, &UnicodeSentenceSplitter).is_none());
    }

    #[test]
    fn test_too_many_highlights() {
        let text = (0..6)
            .map(|i| format!("Highlight number {} is long enough .", i))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(clean_highlights(&text, &UnicodeSentenceSplitter).is_none());
    }

    #[test]
    fn test_abbreviations_keep_highlights_whole() {
        let text = "Mr. Smith meets U.S. Army leaders in Kabul .\nDr. Jones says the talks went well .\nNo agreement was signed on Monday .";
        let cleaned = clean_highlights(text, &UnicodeSentenceSplitter).unwrap();
        assert_eq!(
            cleaned,
            vec![
                "Mr. Smith meets U.S. Army leaders in Kabul .",
                "Dr. Jones says the talks went well .",
                "No agreement was signed on Monday ."
            ]
        );
    }

    #[test]
    fn test_strip_dash_prefix() {
        assert_eq!(strip_boilerplate("LONDON, England -- The story"), " The story");
    }

    #[test]
    fn test_strip_cnn_prefix() {
        assert_eq!(strip_boilerplate("ATLANTA (CNN)The story"), "The story");
        // Both markers: "--" first, then "(CNN)" on what remains
        assert_eq!(
            strip_boilerplate("By Staff -- WASHINGTON (CNN) The story"),
            " The story"
        );
    }

    #[test]
    fn test_long_prefix_kept() {
        let article = format!("{} -- rest", "x".repeat(41));
        assert_eq!(strip_boilerplate(&article), article);
        let article = format!("{} -- rest", "x".repeat(39));
        assert_eq!(strip_boilerplate(&article), " rest");
    }

    #[test]
    fn test_trim_leading_fragments() {
        let article = "By . Jane Doe . PUBLISHED: . 12:01 EST, 4 May 2013 . | . UPDATED: . 13:20 EST, 4 May 2013 . The team won the cup again.";
        assert_eq!(trim_leading_fragments(article), "The team won the cup again.");
    }

    #[test]
    fn test_trim_keeps_article_without_qualifying_fragment() {
        assert_eq!(trim_leading_fragments("a b. c d"), "a b. c d");
    }

    #[test]
    fn test_clean_article_length_threshold() {
        let long = format!("LONDON (CNN) -- {}", body());
        let cleaned = clean_article(&long).unwrap();
        assert!(cleaned.starts_with("The storm"));
        assert!(cleaned.chars().count() >= MIN_ARTICLE_CHARS);

        assert!(clean_article("Too short of an article to keep around.").is_none());
    }
}
