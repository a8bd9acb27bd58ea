use mixform_eval::{EvalError, EvalResult, Evaluation, Evaluator};
use mixform_model::FieldValues;
use tracing::debug;

use crate::store::SchemaStore;

/// Looks `name` up in `store` and evaluates it.
///
/// `seed` defaults to the schema's root mixins. The schema snapshot is taken
/// once, so concurrent writes to the same schema never affect a running
/// evaluation.
pub fn evaluate_named(
    store: &dyn SchemaStore,
    evaluator: &Evaluator,
    name: &str,
    seed: Option<&[String]>,
    values: &FieldValues,
) -> EvalResult<Evaluation> {
    let schema = store
        .get_schema(name)
        .ok_or_else(|| EvalError::NotFound(name.to_string()))?;
    let seed = seed.unwrap_or(&schema.root_mixins);
    let evaluation = evaluator.evaluate(name, &schema, seed, values)?;
    debug!(
        schema = %name,
        active = evaluation.active_mixins.len(),
        fields = evaluation.available_fields.len(),
        "Schema evaluated"
    );
    Ok(evaluation)
}
