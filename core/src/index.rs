use crate::document::{compute_average_rating, DocumentData};
use crate::tokenizer::{split_into_words, validate_word};
use crate::{DocumentId, DocumentStatus, Result, SearchError};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Inverted index over immutable documents.
///
/// Writes take `&mut self` and reads take `&self`, so the borrow checker
/// enforces a single writer or any number of readers. There is no interior
/// locking.
#[derive(Debug, Default, Clone)]
pub struct SearchServer {
    pub(crate) stop_words: BTreeSet<String>,
    /// word -> document id -> term frequency
    pub(crate) word_to_document_freqs: BTreeMap<String, BTreeMap<DocumentId, f64>>,
    pub(crate) documents: BTreeMap<DocumentId, DocumentData>,
    /// Document ids in insertion order
    document_ids: Vec<DocumentId>,
}

impl SearchServer {
    /// Build an empty index with the given stop words. Fails on the first invalid stop word.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            validate_word(word)?;
            if word.is_empty() { continue; }
            set.insert(word.to_string());
        }
        Ok(Self { stop_words: set, ..Self::default() })
    }

    /// Build an index whose stop words are the space-separated words of `text`.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn add_document(&mut self, document_id: DocumentId, document: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateId(document_id));
        }
        if document_id < 0 {
            return Err(SearchError::NegativeId(document_id));
        }
        let words = self.split_into_words_no_stop(document)?;

        let inv_word_count = 1.0 / words.len() as f64;
        for word in &words {
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inv_word_count;
        }
        let rating = compute_average_rating(ratings);
        self.documents.insert(document_id, DocumentData { rating, status });
        self.document_ids.push(document_id);
        tracing::debug!(document_id, words = words.len(), rating, %status, "document added");
        Ok(())
    }

    /// Id of the document inserted at position `index`.
    pub fn document_id(&self, index: usize) -> Result<DocumentId> {
        self.document_ids
            .get(index)
            .copied()
            .ok_or(SearchError::IndexOutOfRange { index, count: self.document_ids.len() })
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    /// Term frequencies of a document keyed by word. Empty for unknown ids
    /// and for documents made only of stop words.
    pub fn word_frequencies(&self, document_id: DocumentId) -> BTreeMap<&str, f64> {
        self.word_to_document_freqs
            .iter()
            .filter_map(|(word, freqs)| freqs.get(&document_id).map(|&tf| (word.as_str(), tf)))
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            validate_word(word)?;
            if !self.is_stop_word(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

impl FromStr for SearchServer {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> { Self::from_stop_words_text(s) }
}
