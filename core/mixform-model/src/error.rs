//! Error types for schema authoring and validation.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// A schema document, or part of one, that breaks a model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A field definition is inconsistent with its type.
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// A trigger's value does not fit its operator, or the operator is unknown.
    #[error("invalid trigger: {reason}")]
    InvalidTrigger { reason: String },

    /// A mixin definition is malformed.
    #[error("invalid mixin '{mixin}': {reason}")]
    InvalidMixin { mixin: String, reason: String },

    /// An intersection rule is malformed.
    #[error("invalid intersection #{index}: {reason}")]
    InvalidIntersection { index: usize, reason: String },

    /// A name reference points at a mixin the schema does not define.
    #[error("{from} references unknown mixin '{to}'")]
    DanglingReference { from: String, to: String },

    /// A name that must be unique within `scope` appears twice.
    #[error("duplicate name '{name}' in {scope}")]
    DuplicateName { scope: String, name: String },
}
