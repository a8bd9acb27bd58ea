use serde::{Deserialize, Serialize};

/// Comparison performed by a [`TriggerCondition`].
///
/// Operator names the model does not know deserialize into [`TriggerOp::Other`]
/// instead of failing the whole document, so the evaluator can report exactly
/// which trigger it cannot run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerOp {
    Eq,
    Neq,
    In,
    Lt,
    Gt,
    Lte,
    Gte,
    Set,
    And,
    #[serde(untagged)]
    Other(String),
}

impl TriggerOp {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::In => "in",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
            Self::Set => "set",
            Self::And => "and",
            Self::Other(name) => name,
        }
    }

    /// Ordering operators compare numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::Lte | Self::Gte)
    }
}

impl std::fmt::Display for TriggerOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a trigger.
///
/// Untagged on the wire. A JSON array of strings becomes `List`, an array of
/// objects becomes `Conditions`; the empty array reads as an empty `List`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Conditions(Vec<TriggerCondition>),
}

impl TriggerValue {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Number(_) | Self::Text(_))
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::Text(_) => "a string",
            Self::List(_) => "a list of strings",
            Self::Conditions(_) => "a list of conditions",
        }
    }
}

impl From<bool> for TriggerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for TriggerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TriggerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TriggerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A predicate over the current field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCondition {
    /// Field whose value is tested. Unused by `and`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    pub op: TriggerOp,
    pub value: TriggerValue,
}

impl TriggerCondition {
    pub fn new(field: &str, op: TriggerOp, value: impl Into<TriggerValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: &str, value: impl Into<TriggerValue>) -> Self {
        Self::new(field, TriggerOp::Eq, value)
    }

    pub fn neq(field: &str, value: impl Into<TriggerValue>) -> Self {
        Self::new(field, TriggerOp::Neq, value)
    }

    /// `in`: the field's value is one of `options`.
    pub fn one_of(field: &str, options: &[&str]) -> Self {
        Self {
            field: field.into(),
            op: TriggerOp::In,
            value: TriggerValue::List(options.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn lt(field: &str, value: impl Into<TriggerValue>) -> Self {
        Self::new(field, TriggerOp::Lt, value)
    }

    pub fn gt(field: &str, value: impl Into<TriggerValue>) -> Self {
        Self::new(field, TriggerOp::Gt, value)
    }

    pub fn lte(field: &str, value: impl Into<TriggerValue>) -> Self {
        Self::new(field, TriggerOp::Lte, value)
    }

    pub fn gte(field: &str, value: impl Into<TriggerValue>) -> Self {
        Self::new(field, TriggerOp::Gte, value)
    }

    /// `set`: the field is filled in (`true`) or empty (`false`).
    pub fn set(field: &str, present: bool) -> Self {
        Self::new(field, TriggerOp::Set, present)
    }

    /// `and`: every nested condition holds.
    pub fn all(conditions: Vec<TriggerCondition>) -> Self {
        Self {
            field: String::new(),
            op: TriggerOp::And,
            value: TriggerValue::Conditions(conditions),
        }
    }

    /// Describes why this condition's value does not fit its operator.
    ///
    /// Only this node is inspected; nested `and` conditions are not.
    /// Unknown operators are not a shape problem and return `None`.
    pub fn shape_error(&self) -> Option<String> {
        let fits = match (&self.op, &self.value) {
            (TriggerOp::Other(_), _) => true,
            (TriggerOp::And, TriggerValue::Conditions(_)) => true,
            (TriggerOp::And, TriggerValue::List(items)) => items.is_empty(),
            (TriggerOp::And, _) => false,
            (TriggerOp::In, value) => matches!(value, TriggerValue::List(_)),
            (TriggerOp::Set, value) => matches!(value, TriggerValue::Bool(_)),
            (_, value) => value.is_scalar(),
        };
        if fits {
            return None;
        }
        let expected = match self.op {
            TriggerOp::And => "a list of conditions",
            TriggerOp::In => "a list of strings",
            TriggerOp::Set => "a boolean",
            _ => "a scalar",
        };
        Some(format!(
            "'{}' expects {expected}, got {}",
            self.op,
            self.value.describe()
        ))
    }
}
