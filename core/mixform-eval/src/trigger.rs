//! Trigger condition semantics.
//!
//! A trigger never fails because of the field values it is given: missing
//! fields read as `""` (or `false` against a boolean), and numeric operators
//! are simply false when either side does not parse. Only the trigger itself
//! can be at fault, as an unknown operator or a value of the wrong shape.

use mixform_model::{
    parse_finite, FieldValue, FieldValues, TriggerCondition, TriggerOp, TriggerValue,
};

use crate::error::TriggerFault;

/// Evaluates `trigger` against `values`.
///
/// Nested `and` conditions are all evaluated, so a malformed condition is
/// reported even when an earlier sibling is already false.
pub fn evaluate_trigger(
    trigger: &TriggerCondition,
    values: &FieldValues,
) -> Result<bool, TriggerFault> {
    if let TriggerOp::Other(op) = &trigger.op {
        return Err(TriggerFault::Unsupported(op.clone()));
    }
    if let Some(reason) = trigger.shape_error() {
        return Err(TriggerFault::Malformed(reason));
    }

    let current = values.get(&trigger.field);
    let holds = match (&trigger.op, &trigger.value) {
        (TriggerOp::And, TriggerValue::Conditions(nested)) => {
            let mut all = true;
            for condition in nested {
                all &= evaluate_trigger(condition, values)?;
            }
            all
        }
        // shape_error only lets an empty list through here
        (TriggerOp::And, _) => true,
        (TriggerOp::Eq, expected) => scalar_eq(current, expected),
        (TriggerOp::Neq, expected) => !scalar_eq(current, expected),
        (TriggerOp::In, TriggerValue::List(options)) => {
            let text = current.map(FieldValue::as_text).unwrap_or_default();
            options.iter().any(|o| o.as_str() == text.as_ref())
        }
        (TriggerOp::Set, TriggerValue::Bool(want)) => {
            current.is_some_and(FieldValue::is_present) == *want
        }
        (op, bound) if op.is_numeric() => compare_numbers(op, current, bound),
        (op, value) => {
            return Err(TriggerFault::Malformed(format!(
                "'{op}' cannot test {value:?}"
            )));
        }
    };
    Ok(holds)
}

fn scalar_eq(current: Option<&FieldValue>, expected: &TriggerValue) -> bool {
    match expected {
        TriggerValue::Bool(want) => match current {
            None => !*want,
            Some(FieldValue::Bool(b)) => b == want,
            Some(other) => other.as_text() == if *want { "true" } else { "false" },
        },
        TriggerValue::Number(n) => current.and_then(FieldValue::as_number) == Some(*n),
        TriggerValue::Text(s) => {
            current.map(FieldValue::as_text).unwrap_or_default().as_ref() == s.as_str()
        }
        TriggerValue::List(_) | TriggerValue::Conditions(_) => false,
    }
}

fn compare_numbers(op: &TriggerOp, current: Option<&FieldValue>, bound: &TriggerValue) -> bool {
    let lhs = current.and_then(FieldValue::as_number);
    let rhs = match bound {
        TriggerValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        TriggerValue::Text(s) => parse_finite(s),
        _ => None,
    };
    let (Some(a), Some(b)) = (lhs, rhs) else {
        return false;
    };
    match op {
        TriggerOp::Lt => a < b,
        TriggerOp::Gt => a > b,
        TriggerOp::Lte => a <= b,
        TriggerOp::Gte => a >= b,
        _ => false,
    }
}
