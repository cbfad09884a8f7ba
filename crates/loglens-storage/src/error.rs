//! Storage error types.

use thiserror::Error;

/// Errors from the durable key-value layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file held something other than a JSON string map.
    #[error("corrupted store: {0}")]
    Corrupted(String),

    /// An interior lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
