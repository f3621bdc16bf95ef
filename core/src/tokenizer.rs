use crate::{Result, SearchError};

/// Split text into words on ASCII spaces. Runs of spaces never yield empty words;
/// tabs and newlines are kept as part of a word.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// A word is valid when it contains no control characters (U+0000..=U+001F).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

pub(crate) fn validate_word(word: &str) -> Result<()> {
    if is_valid_word(word) { Ok(()) } else { Err(SearchError::InvalidToken(word.to_string())) }
}
