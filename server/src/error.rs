//! Problem responses for the HTTP API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mixform_eval::EvalError;
use mixform_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned for every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self {
            kind: "problem".to_string(),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
        }
    }
}

/// Anything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body could not be read as the expected JSON document.
    #[error(transparent)]
    Body(#[from] JsonRejection),

    /// The request is well-formed JSON but contradicts its own path.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Eval(EvalError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Eval(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(StoreError::NotFound(_) | StoreError::MixinNotFound { .. }) => {
                StatusCode::NOT_FOUND
            }
            Self::Store(StoreError::InvalidName(_) | StoreError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Store(StoreError::Io(_) | StoreError::Serialization(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Body(rejection) => rejection.status(),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Eval(EvalError::NotFound(_)) | Self::Store(StoreError::NotFound(_)) => {
                "Schema not found"
            }
            Self::Eval(EvalError::CyclicSchema { .. }) => "Cyclic schema",
            Self::Eval(EvalError::UnsupportedOperator { .. }) => "Unsupported trigger operator",
            Self::Eval(EvalError::MalformedTrigger { .. }) => "Malformed trigger",
            Self::Eval(EvalError::UnknownMixin { .. }) => "Unknown mixin",
            Self::Store(StoreError::MixinNotFound { .. }) => "Mixin not found",
            Self::Store(StoreError::InvalidName(_)) => "Invalid schema name",
            Self::Store(StoreError::Validation(_)) => "Invalid schema",
            Self::Store(StoreError::Io(_) | StoreError::Serialization(_)) => "Storage failure",
            Self::Body(_) | Self::BadRequest(_) => "Bad request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let detail = match &self {
            Self::Body(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        let problem = Problem::new(status, self.title(), Some(detail));
        (status, Json(problem)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixform_model::ModelError;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::from(EvalError::NotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(EvalError::CyclicSchema {
                schema: "x".into(),
                max_passes: 2
            })
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(StoreError::MixinNotFound {
                schema: "x".into(),
                mixin: "A".into()
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Validation(ModelError::DuplicateName {
                scope: "root_mixins".into(),
                name: "A".into()
            }))
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(StoreError::Io(std::io::Error::other("disk"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadRequest("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn problem_omits_missing_detail() {
        let json = serde_json::to_value(Problem::new(StatusCode::NOT_FOUND, "Schema not found", None))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "problem", "title": "Schema not found", "status": 404})
        );
    }
}
