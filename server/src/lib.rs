//! HTTP API for mixform.
//!
//! Evaluation: `POST /api/schema/{name}/evaluate`.
//! Authoring: `GET/PUT/DELETE /api/schema/{name}`, mixin and root-mixin
//! edits under it, and `GET /api/schema` for the name list.
//! Every error is a [`Problem`] JSON body.

mod config;
mod error;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use mixform_eval::{Evaluation, Evaluator};
use mixform_model::{FieldValues, Mixin, Schema};
use mixform_store::{evaluate_named, SchemaStore, StoreError};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::{ServerConfig, DEFAULT_CONFIG_FILE};
pub use error::{ApiError, ApiResult, Problem};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SchemaStore>,
    pub evaluator: Arc<Evaluator>,
}

impl AppState {
    pub fn new(store: Arc<dyn SchemaStore>, evaluator: Evaluator) -> Self {
        Self {
            store,
            evaluator: Arc::new(evaluator),
        }
    }
}

/// Body of `POST /api/schema/{name}/evaluate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Seed mixins. Omitted means the schema's root mixins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_mixins: Option<Vec<String>>,
    #[serde(default)]
    pub field_values: FieldValues,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SchemaList {
    pub schemas: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub schemas: usize,
}

async fn evaluate_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> ApiResult<Json<Evaluation>> {
    let Json(request) = body?;
    let evaluation = evaluate_named(
        state.store.as_ref(),
        &state.evaluator,
        &name,
        request.active_mixins.as_deref(),
        &request.field_values,
    )?;
    Ok(Json(evaluation))
}

async fn list_handler(State(state): State<AppState>) -> Json<SchemaList> {
    Json(SchemaList {
        schemas: state.store.list_schemas(),
    })
}

async fn get_schema_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Schema>> {
    let schema = state
        .store
        .get_schema(&name)
        .ok_or(StoreError::NotFound(name))?;
    Ok(Json(Schema::clone(&schema)))
}

async fn put_schema_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<Schema>, JsonRejection>,
) -> ApiResult<Json<Schema>> {
    let Json(schema) = body?;
    let stored = state.store.put_schema(&name, schema)?;
    Ok(Json(Schema::clone(&stored)))
}

async fn delete_schema_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_schema(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn put_mixin_handler(
    State(state): State<AppState>,
    Path((name, mixin_name)): Path<(String, String)>,
    body: Result<Json<Mixin>, JsonRejection>,
) -> ApiResult<Json<Schema>> {
    let Json(mixin) = body?;
    if mixin.name != mixin_name {
        return Err(ApiError::BadRequest(format!(
            "mixin name '{}' in body does not match path '{}'",
            mixin.name, mixin_name
        )));
    }
    let schema = state.store.put_mixin(&name, mixin)?;
    Ok(Json(Schema::clone(&schema)))
}

async fn delete_mixin_handler(
    State(state): State<AppState>,
    Path((name, mixin_name)): Path<(String, String)>,
) -> ApiResult<Json<Schema>> {
    let schema = state.store.delete_mixin(&name, &mixin_name)?;
    Ok(Json(Schema::clone(&schema)))
}

async fn add_root_handler(
    State(state): State<AppState>,
    Path((name, mixin_name)): Path<(String, String)>,
) -> ApiResult<Json<Schema>> {
    let schema = state.store.add_root_mixin(&name, &mixin_name)?;
    Ok(Json(Schema::clone(&schema)))
}

async fn remove_root_handler(
    State(state): State<AppState>,
    Path((name, mixin_name)): Path<(String, String)>,
) -> ApiResult<Json<Schema>> {
    let schema = state.store.remove_root_mixin(&name, &mixin_name)?;
    Ok(Json(Schema::clone(&schema)))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let schemas = state.store.list_schemas().len();
    debug!(schemas, "Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        schemas,
    })
}

/// Build the HTTP API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/schema", get(list_handler))
        .route(
            "/api/schema/{name}",
            get(get_schema_handler)
                .put(put_schema_handler)
                .delete(delete_schema_handler),
        )
        .route("/api/schema/{name}/evaluate", post(evaluate_handler))
        .route(
            "/api/schema/{name}/mixins/{mixin}",
            put(put_mixin_handler).delete(delete_mixin_handler),
        )
        .route(
            "/api/schema/{name}/root-mixins/{mixin}",
            post(add_root_handler).delete(remove_root_handler),
        )
        .with_state(state)
}
