//! Schema storage for mixform.
//!
//! - [`SchemaStore`]: get/list/put/delete whole schemas plus the mixin and
//!   root-mixin edits an admin UI performs
//! - [`MemorySchemaStore`]: process-local store
//! - [`DirSchemaStore`]: one JSON document per schema in a directory
//! - [`evaluate_named`]: resolve a schema by name and run the evaluator
//!
//! # Architecture
//!
//! - Every write is validated against the model invariants before it lands,
//!   so dangling references never reach the evaluator
//! - Reads hand out `Arc<Schema>` snapshots; evaluation holds no lock
//! - Directory writes go to a temp file first and are renamed into place

mod dir;
mod error;
mod evaluate;
mod memory;
mod store;

pub mod demo;

pub use dir::DirSchemaStore;
pub use error::{StoreError, StoreResult};
pub use evaluate::evaluate_named;
pub use memory::MemorySchemaStore;
pub use store::{validate_schema_name, SchemaEdit, SchemaStore, MAX_SCHEMA_NAME_LEN};
