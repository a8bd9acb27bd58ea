use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use mixform_model::Schema;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::store::{validate_schema_name, SchemaEdit, SchemaStore};

/// Hook run while the write lock is held, after validation and before the
/// in-memory map changes. `None` means the schema is being deleted.
pub(crate) type Persist<'a> = &'a dyn Fn(&str, Option<&Schema>) -> StoreResult<()>;

fn no_persist(_: &str, _: Option<&Schema>) -> StoreResult<()> {
    Ok(())
}

/// Schema store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemorySchemaStore {
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
}

impl MemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Schema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Schema>>> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts an already validated schema without persisting it.
    pub(crate) fn insert_loaded(&self, name: String, schema: Schema) {
        self.write().insert(name, Arc::new(schema));
    }

    pub(crate) fn put_with(
        &self,
        name: &str,
        schema: Schema,
        persist: Persist<'_>,
    ) -> StoreResult<Arc<Schema>> {
        validate_schema_name(name)?;
        schema.validate()?;
        let mut schemas = self.write();
        persist(name, Some(&schema))?;
        let schema = Arc::new(schema);
        schemas.insert(name.to_string(), Arc::clone(&schema));
        info!(schema = %name, mixins = schema.mixins.len(), "Schema saved");
        Ok(schema)
    }

    pub(crate) fn delete_with(&self, name: &str, persist: Persist<'_>) -> StoreResult<()> {
        let mut schemas = self.write();
        if !schemas.contains_key(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        persist(name, None)?;
        schemas.remove(name);
        info!(schema = %name, "Schema deleted");
        Ok(())
    }

    pub(crate) fn update_with(
        &self,
        name: &str,
        edit: SchemaEdit<'_>,
        persist: Persist<'_>,
    ) -> StoreResult<Arc<Schema>> {
        let mut schemas = self.write();
        let current = schemas
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let mut draft = Schema::clone(current);
        edit(&mut draft)?;
        draft.validate()?;
        persist(name, Some(&draft))?;
        let draft = Arc::new(draft);
        schemas.insert(name.to_string(), Arc::clone(&draft));
        info!(schema = %name, "Schema updated");
        Ok(draft)
    }
}

impl SchemaStore for MemorySchemaStore {
    fn get_schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.read().get(name).cloned()
    }

    fn list_schemas(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn put_schema(&self, name: &str, schema: Schema) -> StoreResult<Arc<Schema>> {
        self.put_with(name, schema, &no_persist)
    }

    fn delete_schema(&self, name: &str) -> StoreResult<()> {
        self.delete_with(name, &no_persist)
    }

    fn update_schema(&self, name: &str, edit: SchemaEdit<'_>) -> StoreResult<Arc<Schema>> {
        self.update_with(name, edit, &no_persist)
    }
}
