use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("index not ready, call index() first")]
    NotReady,

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("vector store error: {0}")]
    Store(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("completion error: {0}")]
    Completion(String),

    #[error("indexing error: {0}")]
    Indexing(String),

    #[error("empty seed set: {0}")]
    EmptySeedSet(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RagError>;

impl From<anyhow::Error> for RagError {
    fn from(e: anyhow::Error) -> Self {
        RagError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for RagError {
    fn from(e: std::io::Error) -> Self {
        RagError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RagError {
    fn from(e: serde_json::Error) -> Self {
        RagError::Internal(e.to_string())
    }
}
