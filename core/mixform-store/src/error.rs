//! Error types for schema stores.

use mixform_model::ModelError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or changing stored schemas.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No schema is stored under this name.
    #[error("schema not found: {0}")]
    NotFound(String),

    /// The schema exists but has no such mixin (or root entry).
    #[error("mixin '{mixin}' not found in schema '{schema}'")]
    MixinNotFound { schema: String, mixin: String },

    /// Schema names double as file names and must be `[A-Za-z0-9_-]{1,64}`.
    #[error("invalid schema name: {0:?}")]
    InvalidName(String),

    /// The write would leave the schema violating a model invariant.
    #[error("validation failed: {0}")]
    Validation(#[from] ModelError),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
