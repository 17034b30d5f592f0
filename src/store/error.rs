use thiserror::Error;

/// Everything that can go wrong across the store.
///
/// In-memory operations are total by design; only schema construction
/// with an empty name, lookups of unknown tables, duplicate table
/// creation and the embedded-file round trip can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("does not exist: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("no file path is bound to this database")]
    NoFilePath,

    #[error("persistence failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("persistence failure: {0}")]
    Encoding(#[from] serde_json::Error),
}
