//! Error types for the forest store library.

use thiserror::Error;

/// Errors that can occur when working with the feature store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The underlying database driver reported a failure.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A backend invariant was broken (e.g. a poisoned lock).
    #[error("internal store error: {0}")]
    Internal(String),
}

/// Result type alias using [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
