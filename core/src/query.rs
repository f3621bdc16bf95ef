use crate::tokenizer::{split_into_words, validate_word};
use crate::{Result, SearchError};
use std::collections::BTreeSet;

/// Parsed query: words that raise relevance and words that disqualify a document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    validate_word(word)?;
    if word == "-" {
        return Err(SearchError::InvalidQuerySyntax { word: word.to_string(), reason: "empty minus-word" });
    }
    if word.starts_with("--") {
        return Err(SearchError::InvalidQuerySyntax { word: word.to_string(), reason: "double minus" });
    }
    match word.strip_prefix('-') {
        Some(data) => Ok(QueryWord { data, is_minus: true }),
        None => Ok(QueryWord { data: word, is_minus: false }),
    }
}

impl Query {
    /// Parse raw query text. Stop words are dropped whether or not they carry a minus.
    pub fn parse(text: &str, stop_words: &BTreeSet<String>) -> Result<Self> {
        let mut query = Query::default();
        for word in split_into_words(text) {
            let qw = parse_query_word(word)?;
            if stop_words.contains(qw.data) { continue; }
            if qw.is_minus {
                query.minus_words.insert(qw.data.to_string());
            } else {
                query.plus_words.insert(qw.data.to_string());
            }
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool { self.plus_words.is_empty() && self.minus_words.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn classifies_plus_and_minus_words() {
        let q = Query::parse("fluffy -dog cat fluffy -dog", &stop(&[])).unwrap();
        assert_eq!(q.plus_words, stop(&["cat", "fluffy"]));
        assert_eq!(q.minus_words, stop(&["dog"]));
    }

    #[test]
    fn drops_stop_words_from_both_sets() {
        let q = Query::parse("and cat -and -in", &stop(&["and", "in"])).unwrap();
        assert_eq!(q.plus_words, stop(&["cat"]));
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn rejects_malformed_minus_words() {
        let err = Query::parse("cat -", &stop(&[])).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuerySyntax { reason: "empty minus-word", .. }));

        let err = Query::parse("--fluffy", &stop(&[])).unwrap_err();
        assert_eq!(err, SearchError::InvalidQuerySyntax { word: "--fluffy".into(), reason: "double minus" });
    }

    #[test]
    fn rejects_control_characters_before_syntax() {
        let err = Query::parse("--sk\x12y", &stop(&[])).unwrap_err();
        assert_eq!(err, SearchError::InvalidToken("--sk\x12y".into()));
        let err = Query::parse("-sk\x12y", &stop(&[])).unwrap_err();
        assert_eq!(err, SearchError::InvalidToken("-sk\x12y".into()));
    }

    #[test]
    fn empty_query_has_no_words() {
        assert!(Query::parse("   ", &stop(&[])).unwrap().is_empty());
    }
}
