//! In-memory TF-IDF document search.
//!
//! Documents are split on spaces, stop words are dropped and the rest go into an
//! inverted index keyed by word. Queries support minus words (`-word`) that exclude
//! any document containing them.

pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod search_server;
pub mod store;
pub mod tokenizer;

pub use dedup::remove_duplicates;
pub use document::{Document, DocumentId, DocumentRecord, DocumentStatus};
pub use error::{ErrorKind, Result, SearchError};
pub use search_server::{SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
