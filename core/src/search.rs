//! Ranked retrieval and per-document matching.
//!
//! Relevance of a document is the sum over plus-words of `tf * ln(N / df)`.
//! A document containing any minus-word is dropped regardless of its score.

use crate::{Document, DocumentId, DocumentStatus, Query, Result, SearchError, SearchServer};
use crate::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use std::cmp::Ordering;
use std::collections::BTreeMap;

impl SearchServer {
    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        Query::parse(raw_query, &self.stop_words)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, best first.
    pub fn find_top_documents_by<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut matched = self.find_all_documents(&query, predicate);
        sort_by_relevance(&mut matched);
        let total_hits = matched.len();
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        tracing::debug!(
            plus_words = query.plus_words.len(),
            minus_words = query.minus_words.len(),
            total_hits,
            returned = matched.len(),
            "query evaluated"
        );
        Ok(matched)
    }

    pub fn find_top_documents_with_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, |_, document_status, _| document_status == status)
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Plus-words of the query found in the document, together with its status.
    /// A single minus-word hit empties the list.
    pub fn match_document(&self, raw_query: &str, document_id: DocumentId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let data = self
            .documents
            .get(&document_id)
            .ok_or(SearchError::DocumentNotFound(document_id))?;

        if query.minus_words.iter().any(|word| self.word_in_document(word, document_id)) {
            return Ok((Vec::new(), data.status));
        }
        let matched_words = query
            .plus_words
            .into_iter()
            .filter(|word| self.word_in_document(word, document_id))
            .collect();
        Ok((matched_words, data.status))
    }

    fn word_in_document(&self, word: &str, document_id: DocumentId) -> bool {
        self.word_to_document_freqs
            .get(word)
            .is_some_and(|freqs| freqs.contains_key(&document_id))
    }

    fn inverse_document_freq(&self, documents_with_word: usize) -> f64 {
        (self.document_count() as f64 / documents_with_word as f64).ln()
    }

    fn find_all_documents<F>(&self, query: &Query, predicate: F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(freqs) = self.word_to_document_freqs.get(word) else { continue };
            let idf = self.inverse_document_freq(freqs.len());
            for (&document_id, &term_freq) in freqs {
                let data = &self.documents[&document_id];
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            let Some(freqs) = self.word_to_document_freqs.get(word) else { continue };
            for document_id in freqs.keys() {
                document_to_relevance.remove(document_id);
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.documents[&id].rating))
            .collect()
    }
}

/// Best first. The epsilon tie-break is not a total order; near-ties are settled by an
/// insertion pass after a total sort, leaving adjacent pairs in `compare_by_relevance` order.
fn sort_by_relevance(documents: &mut [Document]) {
    documents.sort_by(|lhs, rhs| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then_with(|| rhs.rating.cmp(&lhs.rating))
    });
    for i in 1..documents.len() {
        let mut j = i;
        while j > 0 && compare_by_relevance(&documents[j - 1], &documents[j]) == Ordering::Greater {
            documents.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn compare_by_relevance(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.partial_cmp(&lhs.relevance).unwrap_or(Ordering::Equal)
    }
}
