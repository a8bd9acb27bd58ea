use std::collections::HashSet;

use mixform_model::{FieldValues, Schema, SchemaField};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EvalError, EvalResult};
use crate::trigger::evaluate_trigger;

/// Tunables for [`Evaluator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Upper bound on closure passes. `None` uses the schema's mixin count + 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<usize>,
}

/// What a form should show for one set of field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Active mixins in activation order; seed entries come first.
    pub active_mixins: Vec<String>,
    /// Fields of every active mixin in activation order, followed by the
    /// additions of every satisfied intersection rule. Not deduplicated.
    pub available_fields: Vec<SchemaField>,
}

impl Evaluation {
    pub fn is_active(&self, mixin: &str) -> bool {
        self.active_mixins.iter().any(|m| m == mixin)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.available_fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Computes the active mixin closure and the resulting field list.
///
/// Stateless apart from its config: the same inputs always give the same
/// [`Evaluation`], and a shared `&Evaluator` can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates starting from the schema's own root mixins.
    pub fn evaluate_from_roots(
        &self,
        schema_name: &str,
        schema: &Schema,
        values: &FieldValues,
    ) -> EvalResult<Evaluation> {
        self.evaluate(schema_name, schema, &schema.root_mixins, values)
    }

    /// Evaluates `schema` from `seed` against `values`.
    ///
    /// Field names in `values` that no mixin defines are ignored.
    /// `schema_name` is only used to label errors and logs.
    pub fn evaluate(
        &self,
        schema_name: &str,
        schema: &Schema,
        seed: &[String],
        values: &FieldValues,
    ) -> EvalResult<Evaluation> {
        let max_passes = self
            .config
            .max_passes
            .unwrap_or(schema.mixins.len() + 1);

        let mut active: Vec<String> = Vec::with_capacity(seed.len());
        let mut visited: HashSet<&str> = HashSet::new();
        for name in seed {
            if !visited.insert(name.as_str()) {
                continue;
            }
            if schema.mixin(name).is_none() {
                return Err(EvalError::UnknownMixin {
                    schema: schema_name.into(),
                    mixin: name.clone(),
                    from: "seed".into(),
                });
            }
            active.push(name.clone());
        }

        // Worklist processed one level at a time: [frontier, active.len())
        // holds the mixins added by the previous pass.
        let mut frontier = 0;
        let mut passes = 0;
        while frontier < active.len() {
            passes += 1;
            if passes > max_passes {
                return Err(EvalError::CyclicSchema {
                    schema: schema_name.into(),
                    max_passes,
                });
            }
            let end = active.len();
            for index in frontier..end {
                let Some(parent) = schema.mixin(&active[index]) else {
                    continue;
                };
                for child in &parent.children {
                    let fired = evaluate_trigger(&child.trigger, values)
                        .map_err(|fault| fault.in_mixin(schema_name, &parent.name))?;
                    if !fired || visited.contains(child.mixin.as_str()) {
                        continue;
                    }
                    if schema.mixin(&child.mixin).is_none() {
                        return Err(EvalError::UnknownMixin {
                            schema: schema_name.into(),
                            mixin: child.mixin.clone(),
                            from: format!("mixin '{}'", parent.name),
                        });
                    }
                    debug!(
                        schema = %schema_name,
                        parent = %parent.name,
                        mixin = %child.mixin,
                        pass = passes,
                        "Mixin activated"
                    );
                    visited.insert(child.mixin.as_str());
                    active.push(child.mixin.clone());
                }
            }
            frontier = end;
        }

        let mut available_fields: Vec<SchemaField> = active
            .iter()
            .filter_map(|name| schema.mixin(name))
            .flat_map(|mixin| mixin.fields.iter().cloned())
            .collect();

        for (index, rule) in schema.intersections.iter().enumerate() {
            if let Some(missing) = rule.when.iter().find(|m| schema.mixin(m).is_none()) {
                return Err(EvalError::UnknownMixin {
                    schema: schema_name.into(),
                    mixin: missing.clone(),
                    from: format!("intersection #{index}"),
                });
            }
            if rule.when.iter().all(|m| visited.contains(m.as_str())) {
                debug!(
                    schema = %schema_name,
                    rule = index,
                    fields = rule.adds.len(),
                    "Intersection rule satisfied"
                );
                available_fields.extend(rule.adds.iter().cloned());
            }
        }

        Ok(Evaluation {
            active_mixins: active,
            available_fields,
        })
    }
}
