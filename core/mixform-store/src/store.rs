use std::sync::Arc;

use mixform_model::{Mixin, Schema};

use crate::error::{StoreError, StoreResult};

/// Longest accepted schema name.
pub const MAX_SCHEMA_NAME_LEN: usize = 64;

/// Checks that `name` is usable as a schema key and file stem.
pub fn validate_schema_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_SCHEMA_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Edit applied by [`SchemaStore::update_schema`].
pub type SchemaEdit<'a> = &'a mut dyn FnMut(&mut Schema) -> StoreResult<()>;

/// Persistence for schema documents, keyed by schema name.
///
/// Readers get `Arc<Schema>` snapshots: a schema handed out is never mutated,
/// so evaluations run without holding any store lock. Every write is
/// validated with [`Schema::validate`] before it replaces the stored copy.
pub trait SchemaStore: Send + Sync {
    /// Returns the stored schema, if any.
    fn get_schema(&self, name: &str) -> Option<Arc<Schema>>;

    /// Names of all stored schemas, sorted.
    fn list_schemas(&self) -> Vec<String>;

    /// Validates and stores `schema` under `name`, replacing any previous one.
    fn put_schema(&self, name: &str, schema: Schema) -> StoreResult<Arc<Schema>>;

    /// Removes a schema.
    fn delete_schema(&self, name: &str) -> StoreResult<()>;

    /// Applies `edit` to a copy of the stored schema, validates the result and
    /// stores it. If `edit` or validation fails the stored schema is unchanged.
    fn update_schema(&self, name: &str, edit: SchemaEdit<'_>) -> StoreResult<Arc<Schema>>;

    /// Inserts or replaces a mixin.
    fn put_mixin(&self, schema: &str, mixin: Mixin) -> StoreResult<Arc<Schema>> {
        self.update_schema(schema, &mut |s: &mut Schema| {
            s.insert_mixin(mixin.clone());
            Ok(())
        })
    }

    /// Removes a mixin. Fails validation if anything still references it.
    fn delete_mixin(&self, schema: &str, mixin: &str) -> StoreResult<Arc<Schema>> {
        self.update_schema(schema, &mut |s: &mut Schema| match s.remove_mixin(mixin) {
            Some(_) => Ok(()),
            None => Err(StoreError::MixinNotFound {
                schema: schema.into(),
                mixin: mixin.into(),
            }),
        })
    }

    /// Makes an existing mixin a root. Adding an existing root is a no-op.
    fn add_root_mixin(&self, schema: &str, mixin: &str) -> StoreResult<Arc<Schema>> {
        self.update_schema(schema, &mut |s: &mut Schema| {
            if s.mixin(mixin).is_none() {
                return Err(StoreError::MixinNotFound {
                    schema: schema.into(),
                    mixin: mixin.into(),
                });
            }
            if !s.is_root(mixin) {
                s.root_mixins.push(mixin.to_string());
            }
            Ok(())
        })
    }

    /// Removes a root entry. The mixin itself stays.
    fn remove_root_mixin(&self, schema: &str, mixin: &str) -> StoreResult<Arc<Schema>> {
        self.update_schema(schema, &mut |s: &mut Schema| {
            let before = s.root_mixins.len();
            s.root_mixins.retain(|m| m != mixin);
            if s.root_mixins.len() == before {
                return Err(StoreError::MixinNotFound {
                    schema: schema.into(),
                    mixin: mixin.into(),
                });
            }
            Ok(())
        })
    }
}
