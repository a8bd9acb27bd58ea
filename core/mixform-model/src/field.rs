use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Current form values keyed by field name.
pub type FieldValues = BTreeMap<String, FieldValue>;

/// A single form value as it arrives from a client.
///
/// JSON carries these untagged: `"abc"`, `true`, `3.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// String rendering used for equality and membership tests.
    ///
    /// Numbers use the shortest round-trip form, so `3.0` renders as `"3"`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Numeric reading of the value. Booleans never parse, and neither do
    /// `"inf"` or `"NaN"`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Bool(_) => None,
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => parse_finite(s),
        }
    }

    /// Whether the value counts as "filled in": not `""` and not `false`.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(_) => true,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

/// Parses `text` as a finite number, ignoring surrounding whitespace.
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The wire-level type tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Enum,
    Bool,
    Unit,
    File,
}

/// A field's type together with the attributes only that type carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Enum { options: Vec<String> },
    Bool,
    Unit { unit: String },
    File,
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Number => FieldType::Number,
            Self::Enum { .. } => FieldType::Enum,
            Self::Bool => FieldType::Bool,
            Self::Unit { .. } => FieldType::Unit,
            Self::File => FieldType::File,
        }
    }

    /// Checks that `value` is an acceptable default for this kind.
    pub(crate) fn check_default(&self, value: &FieldValue) -> Result<(), String> {
        match (self, value) {
            (Self::Bool, FieldValue::Bool(_)) => Ok(()),
            (Self::Bool, _) => Err("default of a bool field must be a boolean".into()),
            (Self::Number, v) if v.as_number().is_some() => Ok(()),
            (Self::Number, _) => Err("default of a number field must be numeric".into()),
            (Self::Enum { options }, FieldValue::Text(s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(())
                } else {
                    Err(format!("default '{s}' is not one of the enum options"))
                }
            }
            (Self::Enum { .. }, _) => Err("default of an enum field must be a string".into()),
            (Self::Text | Self::Unit { .. } | Self::File, FieldValue::Text(_)) => Ok(()),
            (kind, _) => Err(format!(
                "default of a {:?} field must be a string",
                kind.field_type()
            )),
        }
    }
}

/// One input on a form, contributed by a mixin or an intersection rule.
///
/// Serialized flat, matching what form clients consume:
/// `{"name": "weight", "type": "unit", "unit": "kg", "required": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchemaField", into = "RawSchemaField")]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldValue>,
}

impl SchemaField {
    fn simple(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
        }
    }

    /// Shorthand for a free text field.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldKind::Text)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldKind::Number)
    }

    /// Shorthand for a checkbox field.
    pub fn bool(name: &str) -> Self {
        Self::simple(name, FieldKind::Bool)
    }

    /// Shorthand for a file upload field.
    pub fn file(name: &str) -> Self {
        Self::simple(name, FieldKind::File)
    }

    /// Shorthand for an enum field with fixed options.
    pub fn enumeration(name: &str, options: Vec<String>) -> Self {
        Self::simple(name, FieldKind::Enum { options })
    }

    /// Shorthand for a quantity measured in `unit`.
    pub fn unit(name: &str, unit: &str) -> Self {
        Self::simple(
            name,
            FieldKind::Unit {
                unit: unit.into(),
            },
        )
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the value a newly shown field starts with.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Serialize, Deserialize)]
struct RawSchemaField {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<FieldValue>,
}

impl TryFrom<RawSchemaField> for SchemaField {
    type Error = ModelError;

    fn try_from(raw: RawSchemaField) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| ModelError::InvalidField {
            field: raw.name.clone(),
            reason: reason.into(),
        };
        let kind = match raw.field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::Number => FieldKind::Number,
            FieldType::Bool => FieldKind::Bool,
            FieldType::File => FieldKind::File,
            FieldType::Enum => match &raw.options {
                Some(options) if !options.is_empty() => FieldKind::Enum {
                    options: options.clone(),
                },
                _ => return Err(invalid("enum fields need at least one option")),
            },
            FieldType::Unit => match &raw.unit {
                Some(unit) if !unit.trim().is_empty() => FieldKind::Unit { unit: unit.clone() },
                _ => return Err(invalid("unit fields need a non-empty unit")),
            },
        };
        if let Some(default) = &raw.default {
            kind.check_default(default)
                .map_err(|reason| invalid(&reason))?;
        }
        Ok(Self {
            name: raw.name,
            kind,
            required: raw.required,
            default: raw.default,
        })
    }
}

impl From<SchemaField> for RawSchemaField {
    fn from(field: SchemaField) -> Self {
        let field_type = field.field_type();
        let (options, unit) = match field.kind {
            FieldKind::Enum { options } => (Some(options), None),
            FieldKind::Unit { unit } => (None, Some(unit)),
            _ => (None, None),
        };
        Self {
            name: field.name,
            field_type,
            options,
            unit,
            required: field.required,
            default: field.default,
        }
    }
}
