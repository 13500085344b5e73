//! Sentence boundary detection.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into an ordered sequence of sentences.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Lower-cased abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "vs", "etc", "inc", "ltd", "corp", "co", "st",
    "ave", "blvd", "rd", "mt", "ft", "dept", "gov", "sen", "rep", "gen", "col", "capt", "lt",
    "sgt", "cpl", "adm", "rev", "hon", "pres", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec", "cf", "al", "vol", "fig", "pp", "ph.d",
];

/// UAX #29 sentence boundaries, with a segment ending in a known
/// abbreviation or in initials (`U.S.`, `J.`) joined to the next one.
/// Line breaks inside a sentence are removed and surrounding whitespace
/// trimmed; empty sentences are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();
        for segment in text.unicode_sentences() {
            pending.push_str(segment);
            if ends_with_abbreviation(&pending) {
                continue;
            }
            push_sentence(&mut sentences, &pending);
            pending.clear();
        }
        push_sentence(&mut sentences, &pending);
        sentences
    }
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.replace('\n', "").trim().to_string();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

/// Whether the last word of `text` is an abbreviation with its period.
fn ends_with_abbreviation(text: &str) -> bool {
    let Some(word) = text.split_whitespace().last() else {
        return false;
    };
    let Some(stem) = word.strip_suffix('.') else {
        return false;
    };
    let stem = stem.trim_start_matches(|c: char| !c.is_alphanumeric());
    ABBREVIATIONS.contains(&stem.to_lowercase().as_str()) || is_initials(stem)
}

/// `U.S`, `D.C`, `e.g` or a single capital other than `I`.
fn is_initials(stem: &str) -> bool {
    let mut parts = stem.split('.').peekable();
    let dotted = stem.contains('.');
    parts.peek().is_some()
        && parts.all(|part| {
            let mut chars = part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.is_alphabetic() && (dotted || (c.is_uppercase() && c != 'I')),
                _ => false,
            }
        })
}
