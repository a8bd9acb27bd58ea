//! Trigger-based schema evaluation for mixform.
//!
//! Given a [`Schema`](mixform_model::Schema), a seed of active mixins and the
//! current field values, the [`Evaluator`] computes:
//!
//! 1. the closure of active mixins, following child triggers breadth-first
//!    until no pass adds anything (bounded, see [`EvaluatorConfig`]);
//! 2. the fields those mixins contribute, in activation order;
//! 3. the extra fields of every intersection rule whose mixins are all active.
//!
//! Evaluation is a pure function of its inputs. [`FormSession`] is the
//! caller-side counterpart: it keeps working values and a
//! [`RestorationCache`] in step with successive evaluations.

mod error;
mod evaluator;
mod reconcile;
mod trigger;

pub use error::{EvalError, EvalResult, TriggerFault};
pub use evaluator::{Evaluation, Evaluator, EvaluatorConfig};
pub use reconcile::{FormSession, ReconcileReport, RestorationCache};
pub use trigger::evaluate_trigger;
