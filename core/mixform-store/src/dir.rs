//! Directory-backed schema store: one pretty-printed `<name>.json` per schema.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mixform_model::Schema;
use tracing::{info, warn};

use crate::error::StoreResult;
use crate::memory::MemorySchemaStore;
use crate::store::{validate_schema_name, SchemaEdit, SchemaStore};

const EXTENSION: &str = "json";

/// Schema store that serves reads from memory and writes every change
/// through to a directory.
#[derive(Debug)]
pub struct DirSchemaStore {
    root: PathBuf,
    schemas: MemorySchemaStore,
}

impl DirSchemaStore {
    /// Opens (or creates) a store rooted at `root` and loads every schema in it.
    ///
    /// Files that do not parse or validate are skipped with a warning so one
    /// bad document does not take the others down.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let schemas = MemorySchemaStore::new();

        for entry in fs::read_dir(&root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_schema_name(name).is_err() {
                warn!(path = %path.display(), "Skipping schema file with invalid name");
                continue;
            }
            match load_schema(&path) {
                Ok(schema) => schemas.insert_loaded(name.to_string(), schema),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable schema file"),
            }
        }

        info!(path = %root.display(), schemas = schemas.len(), "Schema directory loaded");
        Ok(Self { root, schemas })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{EXTENSION}"))
    }

    fn persist(&self, name: &str, schema: Option<&Schema>) -> StoreResult<()> {
        validate_schema_name(name)?;
        let path = self.path_for(name);
        match schema {
            Some(schema) => {
                let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
                fs::write(&tmp, serde_json::to_vec_pretty(schema)?)?;
                fs::rename(&tmp, &path)?;
            }
            None => {
                if path.exists() {
                    fs::remove_file(&path)?;
                }
            }
        }
        Ok(())
    }
}

fn load_schema(path: &Path) -> StoreResult<Schema> {
    let bytes = fs::read(path)?;
    let schema: Schema = serde_json::from_slice(&bytes)?;
    schema.validate()?;
    Ok(schema)
}

impl SchemaStore for DirSchemaStore {
    fn get_schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get_schema(name)
    }

    fn list_schemas(&self) -> Vec<String> {
        self.schemas.list_schemas()
    }

    fn put_schema(&self, name: &str, schema: Schema) -> StoreResult<Arc<Schema>> {
        self.schemas
            .put_with(name, schema, &|n: &str, s: Option<&Schema>| self.persist(n, s))
    }

    fn delete_schema(&self, name: &str) -> StoreResult<()> {
        self.schemas.delete_with(name, &|n: &str, s: Option<&Schema>| self.persist(n, s))
    }

    fn update_schema(&self, name: &str, edit: SchemaEdit<'_>) -> StoreResult<Arc<Schema>> {
        self.schemas
            .update_with(name, edit, &|n: &str, s: Option<&Schema>| self.persist(n, s))
    }
}
