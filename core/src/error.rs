use thiserror::Error;

/// Everything that can go wrong inside the core.
///
/// A malformed or missing data file is deliberately absent: the store
/// recovers it locally by substituting the collection's empty shape.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no food named '{0}'")]
    InvalidReference(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("food '{0}' already exists; edit it instead")]
    DuplicateKey(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
