//! Character-class predicates shared by the cleaning and scoring stages.

/// Whether `text` contains at least one alphabetic character.
pub fn has_alphabetic(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

/// Whether `text` contains at least one numeric character.
pub fn has_numeric(text: &str) -> bool {
    text.chars().any(char::is_numeric)
}
