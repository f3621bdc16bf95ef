//! In-memory document search with TF-IDF ranking, stop words and minus-words.

pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod tokenizer;

pub use document::{Document, DocumentStatus};
pub use error::{Result, SearchError};
pub use index::SearchServer;
pub use query::Query;

pub type DocumentId = i32;

/// Upper bound on the number of documents returned by a ranked search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are considered equal when ranking.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
