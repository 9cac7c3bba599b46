use thiserror::Error;

/// Failures of the raw key/value backend. These never leave the typed
/// store: they are logged there and the operation degrades instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded writing \"{key}\"")]
    QuotaExceeded { key: String },
}
