//! Keeping a form's working values in step with successive evaluations.
//!
//! When a field disappears its value is parked in a [`RestorationCache`]
//! rather than dropped; when it reappears the parked value comes back before
//! any default is considered. A [`FormSession`] owns both the working values
//! and the cache for the lifetime of one editing session.

use std::collections::{BTreeMap, HashSet};

use mixform_model::{FieldKind, FieldValue, FieldValues, Schema, SchemaField};

use crate::error::EvalResult;
use crate::evaluator::{Evaluation, Evaluator};

/// Values of fields that are currently hidden, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestorationCache {
    parked: BTreeMap<String, FieldValue>,
}

impl RestorationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a value, replacing whatever was parked under the same name.
    pub fn park(&mut self, name: &str, value: FieldValue) {
        self.parked.insert(name.to_string(), value);
    }

    /// Removes and returns a parked value.
    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        self.parked.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.parked.get(name)
    }

    pub fn len(&self) -> usize {
        self.parked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parked.is_empty()
    }

    pub fn clear(&mut self) {
        self.parked.clear();
    }
}

/// What one [`FormSession::apply`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Hidden fields whose values moved into the cache.
    pub parked: Vec<String>,
    /// Reappearing fields whose values came back from the cache.
    pub restored: Vec<String>,
    /// New fields that started from their default.
    pub defaulted: Vec<String>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.parked.is_empty() && self.restored.is_empty() && self.defaulted.is_empty()
    }
}

/// Working state of one form being edited.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    values: FieldValues,
    cache: RestorationCache,
    fields: Vec<SchemaField>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session with values loaded from an existing record.
    pub fn with_values(values: FieldValues) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn cache(&self) -> &RestorationCache {
        &self.cache
    }

    /// Fields from the last applied evaluation.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Evaluates `schema` from its roots with the current values and applies
    /// the result.
    ///
    /// Fields that are about to appear take part in evaluation with the value
    /// they will actually start with (restored or default), so a checkbox that
    /// starts ticked does not fire a trigger waiting for it to be cleared.
    /// Evaluation repeats until the visible field set settles, at most once
    /// per mixin.
    pub fn refresh(
        &mut self,
        evaluator: &Evaluator,
        schema_name: &str,
        schema: &Schema,
    ) -> EvalResult<ReconcileReport> {
        let mut evaluation = evaluator.evaluate_from_roots(schema_name, schema, &self.values)?;
        for _ in 0..=schema.mixins.len() {
            let overlay = self.settled_values(&evaluation);
            let next = evaluator.evaluate_from_roots(schema_name, schema, &overlay)?;
            let settled = next.field_names() == evaluation.field_names();
            evaluation = next;
            if settled {
                break;
            }
        }
        Ok(self.apply(&evaluation))
    }

    /// Working values plus the starting value of every field in `evaluation`
    /// that has none yet.
    fn settled_values(&self, evaluation: &Evaluation) -> FieldValues {
        let mut overlay = self.values.clone();
        for field in &evaluation.available_fields {
            if overlay.contains_key(&field.name) {
                continue;
            }
            let start = self
                .cache
                .get(&field.name)
                .cloned()
                .or_else(|| initial_value(field));
            if let Some(value) = start {
                overlay.insert(field.name.clone(), value);
            }
        }
        overlay
    }

    /// Reconciles working values against a new evaluation.
    ///
    /// Applying the same evaluation twice changes nothing the second time.
    pub fn apply(&mut self, evaluation: &Evaluation) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let incoming: HashSet<&str> = evaluation
            .available_fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        let mut previous: HashSet<String> = HashSet::new();
        for field in &self.fields {
            if !previous.insert(field.name.clone()) || incoming.contains(field.name.as_str()) {
                continue;
            }
            if let Some(value) = self.values.remove(&field.name) {
                self.cache.park(&field.name, value);
                report.parked.push(field.name.clone());
            }
        }

        // Later definitions of a duplicated name win, as they would on a form.
        let mut definitions: BTreeMap<&str, &SchemaField> = BTreeMap::new();
        for field in &evaluation.available_fields {
            definitions.insert(field.name.as_str(), field);
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for field in &evaluation.available_fields {
            let name = field.name.as_str();
            if !seen.insert(name) || previous.contains(name) || self.values.contains_key(name) {
                continue;
            }
            if let Some(value) = self.cache.take(name) {
                self.values.insert(name.to_string(), value);
                report.restored.push(name.to_string());
            } else if let Some(value) = initial_value(definitions[name]) {
                self.values.insert(name.to_string(), value);
                report.defaulted.push(name.to_string());
            }
        }

        self.fields = evaluation.available_fields.clone();
        report
    }
}

fn initial_value(field: &SchemaField) -> Option<FieldValue> {
    match (&field.default, &field.kind) {
        (Some(default), _) => Some(default.clone()),
        // Checkboxes start ticked so that clearing one reveals the next level.
        (None, FieldKind::Bool) => Some(FieldValue::Bool(true)),
        (None, _) => None,
    }
}
