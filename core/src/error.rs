//! Search error types.

use crate::DocumentId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors returned by index construction, insertion and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A stop word, document word or query word contains a control character
    #[error("invalid characters in word: {0:?}")]
    InvalidToken(String),

    /// Malformed minus-word in a query
    #[error("invalid query word {word:?}: {reason}")]
    InvalidQuerySyntax { word: String, reason: &'static str },

    #[error("document id {0} is already in the index")]
    DuplicateId(DocumentId),

    #[error("document id {0} is negative")]
    NegativeId(DocumentId),

    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),

    /// Positional lookup past the number of stored documents
    #[error("document index {index} is out of range (count = {count})")]
    IndexOutOfRange { index: usize, count: usize },
}
