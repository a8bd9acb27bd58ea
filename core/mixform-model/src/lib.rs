//! Schema model for mixform.
//!
//! Defines the documents the evaluator works on:
//! - [`SchemaField`]: one form input; its [`FieldKind`] carries the
//!   attributes only that type uses (enum options, unit)
//! - [`TriggerCondition`]: a predicate over field values
//! - [`Mixin`]: a named bundle of fields plus [`ChildMixin`] trigger rules
//! - [`IntersectionRule`]: fields added while several mixins are active together
//! - [`Schema`]: root mixins, the mixin set, and intersection rules
//!
//! Schemas are authored elsewhere and stored as JSON. The `validate_*`
//! functions are the authoring-time checks every store runs before a write.

mod error;
mod field;
mod schema;
mod trigger;
mod validate;

pub use error::{ModelError, ModelResult};
pub use field::{parse_finite, FieldKind, FieldType, FieldValue, FieldValues, SchemaField};
pub use schema::{ChildMixin, IntersectionRule, Mixin, Schema};
pub use trigger::{TriggerCondition, TriggerOp, TriggerValue};
pub use validate::{validate_field, validate_intersection, validate_mixin, validate_trigger};
