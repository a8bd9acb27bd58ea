//! Shared fixtures for store tests.

#![allow(dead_code)]

use mixform_model::{IntersectionRule, Mixin, Schema, SchemaField, TriggerCondition};

/// A small SKU form: a base mixin, a resistor mixin triggered by category,
/// a standalone SMD mixin and an intersection between the last two.
pub fn sku_schema() -> Schema {
    Schema::new()
        .with_root("Base")
        .with_mixin(
            Mixin::new("Base")
                .with_field(SchemaField::text("sku").required())
                .with_field(SchemaField::enumeration(
                    "category",
                    vec!["resistor".into(), "capacitor".into()],
                ))
                .with_child("Resistor", TriggerCondition::eq("category", "resistor")),
        )
        .with_mixin(Mixin::new("Resistor").with_field(SchemaField::unit("resistance", "ohm")))
        .with_mixin(Mixin::new("Smd").with_field(SchemaField::text("package")))
        .with_intersection(IntersectionRule::new(
            &["Resistor", "Smd"],
            vec![SchemaField::text("footprint")],
        ))
}
