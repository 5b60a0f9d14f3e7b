//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

/// Failures of the underlying key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid store key: {0}")]
    InvalidKey(String),
}

/// Failures while saving or loading a snapshot. Callers treat a save
/// failure as a logged no-op: the in-memory snapshot stays usable for the
/// rest of the session even though it was not persisted.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
