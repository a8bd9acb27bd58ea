//! Shared schema builders for evaluator tests.

#![allow(dead_code)]

use mixform_model::{FieldValue, FieldValues, IntersectionRule, Mixin, Schema, SchemaField, TriggerCondition};

/// `Digit1 .. Digit{depth}`, each with a text field `digitN` whose non-empty
/// value activates the next digit.
pub fn digit_chain(depth: usize) -> Schema {
    let mut schema = Schema::new().with_root("Digit1");
    for n in 1..=depth {
        let field = format!("digit{n}");
        let mut mixin = Mixin::new(&format!("Digit{n}")).with_field(SchemaField::text(&field));
        if n < depth {
            mixin = mixin.with_child(&format!("Digit{}", n + 1), TriggerCondition::neq(&field, ""));
        }
        schema = schema.with_mixin(mixin);
    }
    schema
}

/// Two independent roots `A` and `B` with an intersection adding `x`.
pub fn intersecting_pair() -> Schema {
    Schema::new()
        .with_root("A")
        .with_mixin(Mixin::new("A").with_field(SchemaField::text("a")))
        .with_mixin(Mixin::new("B").with_field(SchemaField::text("b")))
        .with_intersection(IntersectionRule::new(&["A", "B"], vec![SchemaField::text("x")]))
}

pub fn values(pairs: &[(&str, FieldValue)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
