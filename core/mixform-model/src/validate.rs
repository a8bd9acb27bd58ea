//! Authoring-time checks for schema parts.
//!
//! Deserialization already guarantees each field's kind carries its payload.
//! These functions cover the rest: naming, uniqueness, defaults and trigger
//! shapes. Stores run them on every write so malformed documents never reach
//! the evaluator.

use std::collections::HashSet;

use crate::error::{ModelError, ModelResult};
use crate::field::{FieldKind, SchemaField};
use crate::schema::{IntersectionRule, Mixin};
use crate::trigger::{TriggerCondition, TriggerOp, TriggerValue};

/// Validates a single field definition.
pub fn validate_field(field: &SchemaField) -> ModelResult<()> {
    let invalid = |reason: String| ModelError::InvalidField {
        field: field.name.clone(),
        reason,
    };
    if field.name.trim().is_empty() {
        return Err(invalid("name is required".into()));
    }
    match &field.kind {
        FieldKind::Enum { options } => {
            if options.is_empty() {
                return Err(invalid("enum fields need at least one option".into()));
            }
            let mut seen = HashSet::new();
            for option in options {
                if option.is_empty() {
                    return Err(invalid("enum options must be non-empty".into()));
                }
                if !seen.insert(option.as_str()) {
                    return Err(invalid(format!("duplicate enum option '{option}'")));
                }
            }
        }
        FieldKind::Unit { unit } if unit.trim().is_empty() => {
            return Err(invalid("unit fields need a non-empty unit".into()));
        }
        _ => {}
    }
    if let Some(default) = &field.default {
        field.kind.check_default(default).map_err(invalid)?;
    }
    Ok(())
}

/// Validates a trigger and, for `and`, every nested condition.
pub fn validate_trigger(trigger: &TriggerCondition) -> ModelResult<()> {
    if let TriggerOp::Other(op) = &trigger.op {
        return Err(ModelError::InvalidTrigger {
            reason: format!("unsupported operator '{op}'"),
        });
    }
    if let Some(reason) = trigger.shape_error() {
        return Err(ModelError::InvalidTrigger { reason });
    }
    match &trigger.value {
        TriggerValue::Conditions(nested) if trigger.op == TriggerOp::And => {
            nested.iter().try_for_each(validate_trigger)
        }
        _ if trigger.op == TriggerOp::And => Ok(()),
        _ if trigger.field.trim().is_empty() => Err(ModelError::InvalidTrigger {
            reason: format!("'{}' needs a field to test", trigger.op),
        }),
        _ => Ok(()),
    }
}

/// Validates a mixin's fields and child triggers.
///
/// Whether child references resolve depends on the enclosing schema and is
/// checked by [`Schema::validate`](crate::Schema::validate).
pub fn validate_mixin(mixin: &Mixin) -> ModelResult<()> {
    if mixin.name.trim().is_empty() {
        return Err(ModelError::InvalidMixin {
            mixin: mixin.name.clone(),
            reason: "name is required".into(),
        });
    }
    check_fields(&format!("mixin '{}'", mixin.name), &mixin.fields)?;

    for child in &mixin.children {
        if child.mixin.trim().is_empty() {
            return Err(ModelError::InvalidMixin {
                mixin: mixin.name.clone(),
                reason: "child mixin name is required".into(),
            });
        }
        if child.mixin == mixin.name {
            return Err(ModelError::InvalidMixin {
                mixin: mixin.name.clone(),
                reason: "a mixin cannot be its own child".into(),
            });
        }
        validate_trigger(&child.trigger).map_err(|e| ModelError::InvalidMixin {
            mixin: mixin.name.clone(),
            reason: format!("trigger for '{}': {e}", child.mixin),
        })?;
    }
    Ok(())
}

/// Validates an intersection rule in isolation. `index` is its position in
/// the schema and is used for error reporting.
pub fn validate_intersection(index: usize, rule: &IntersectionRule) -> ModelResult<()> {
    let invalid = |reason: &str| ModelError::InvalidIntersection {
        index,
        reason: reason.into(),
    };
    let distinct: HashSet<&str> = rule.when.iter().map(String::as_str).collect();
    if distinct.len() != rule.when.len() {
        return Err(invalid("'when' lists a mixin more than once"));
    }
    if distinct.len() < 2 {
        return Err(invalid("'when' needs at least two mixins"));
    }
    if rule.adds.is_empty() {
        return Err(invalid("'adds' is empty"));
    }
    check_fields(&format!("intersection #{index}"), &rule.adds)
}

fn check_fields(scope: &str, fields: &[SchemaField]) -> ModelResult<()> {
    let mut names = HashSet::new();
    for field in fields {
        validate_field(field)?;
        if !names.insert(field.name.as_str()) {
            return Err(ModelError::DuplicateName {
                scope: scope.into(),
                name: field.name.clone(),
            });
        }
    }
    Ok(())
}
