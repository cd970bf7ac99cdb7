//! Storage error types.

/// Errors returned by [`Storage`](crate::Storage) backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend cannot be used at all (no data dir, quota, disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The key contains characters that cannot be mapped to the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}
