//! The "decimal" digit-chain demo schema.
//!
//! `Digit1 .. DigitN` each own a checkbox `digitN`. New checkboxes start
//! ticked; clearing one reveals the next digit. While the first two digits
//! are visible an intersection adds a `precision` field.

use mixform_model::{IntersectionRule, Mixin, Schema, SchemaField, TriggerCondition};
use tracing::info;

use crate::error::StoreResult;
use crate::store::SchemaStore;

pub const DEMO_SCHEMA_NAME: &str = "decimal";

/// Builds the digit chain with `depth` digits (at least two).
pub fn decimal_schema(depth: usize) -> Schema {
    let depth = depth.max(2);
    let mut schema = Schema::new().with_root("Digit1");
    for n in 1..=depth {
        let field = format!("digit{n}");
        let mut mixin = Mixin::new(&format!("Digit{n}")).with_field(SchemaField::bool(&field));
        if n < depth {
            mixin = mixin.with_child(
                &format!("Digit{}", n + 1),
                TriggerCondition::set(&field, false),
            );
        }
        schema = schema.with_mixin(mixin);
    }
    schema.with_intersection(IntersectionRule::new(
        &["Digit1", "Digit2"],
        vec![SchemaField::unit("precision", "dp").with_default("2")],
    ))
}

/// Stores the demo schema unless one named [`DEMO_SCHEMA_NAME`] exists.
pub fn install_demo(store: &dyn SchemaStore, depth: usize) -> StoreResult<()> {
    if store.get_schema(DEMO_SCHEMA_NAME).is_some() {
        return Ok(());
    }
    store.put_schema(DEMO_SCHEMA_NAME, decimal_schema(depth))?;
    info!(schema = DEMO_SCHEMA_NAME, depth, "Demo schema installed");
    Ok(())
}
