//! Error types for schema evaluation.

use thiserror::Error;

/// Result type for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Why an evaluation could not produce a field list.
///
/// Every variant names the schema, and the mixin where one is at fault, so
/// an admin UI can point at the broken definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No schema is stored under this name.
    #[error("schema not found: {0}")]
    NotFound(String),

    /// The trigger closure did not reach a fixed point within the pass cap.
    #[error("schema '{schema}': trigger closure did not converge within {max_passes} passes")]
    CyclicSchema { schema: String, max_passes: usize },

    /// A trigger uses an operator this evaluator does not implement.
    #[error("schema '{schema}', mixin '{mixin}': unsupported trigger operator '{op}'")]
    UnsupportedOperator {
        schema: String,
        mixin: String,
        op: String,
    },

    /// A trigger's value does not have the shape its operator needs.
    #[error("schema '{schema}', mixin '{mixin}': malformed trigger: {reason}")]
    MalformedTrigger {
        schema: String,
        mixin: String,
        reason: String,
    },

    /// A seed entry or child reference names a mixin the schema lacks.
    #[error("schema '{schema}': {from} references unknown mixin '{mixin}'")]
    UnknownMixin {
        schema: String,
        mixin: String,
        from: String,
    },
}

/// A trigger that cannot be evaluated, before schema context is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerFault {
    #[error("unsupported operator '{0}'")]
    Unsupported(String),

    #[error("malformed trigger: {0}")]
    Malformed(String),
}

impl TriggerFault {
    pub(crate) fn in_mixin(self, schema: &str, mixin: &str) -> EvalError {
        match self {
            Self::Unsupported(op) => EvalError::UnsupportedOperator {
                schema: schema.into(),
                mixin: mixin.into(),
                op,
            },
            Self::Malformed(reason) => EvalError::MalformedTrigger {
                schema: schema.into(),
                mixin: mixin.into(),
                reason,
            },
        }
    }
}
