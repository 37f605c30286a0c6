use thiserror::Error;

use crate::DocumentId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Broad failure classes callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid document id: {0} is negative")]
    InvalidId(DocumentId),

    #[error("document id {0} is already indexed")]
    DuplicateId(DocumentId),

    #[error("document text contains invalid word: {0:?}")]
    InvalidContent(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("stop word contains invalid characters: {0:?}")]
    InvalidStopWord(String),

    #[error("document index {index} is out of range (document count is {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("unknown document id: {0}")]
    UnknownDocument(DocumentId),

    #[error("unknown document status: {0:?}")]
    UnknownStatus(String),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidId(_)
            | Self::DuplicateId(_)
            | Self::InvalidContent(_)
            | Self::InvalidQuery(_)
            | Self::InvalidStopWord(_)
            | Self::UnknownStatus(_) => ErrorKind::InvalidArgument,
            Self::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::UnknownDocument(_) => ErrorKind::NotFound,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "INVALID_ID",
            Self::DuplicateId(_) => "DUPLICATE_ID",
            Self::InvalidContent(_) => "INVALID_CONTENT",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::InvalidStopWord(_) => "INVALID_STOP_WORD",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::UnknownDocument(_) => "UNKNOWN_DOCUMENT",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
        }
    }
}
