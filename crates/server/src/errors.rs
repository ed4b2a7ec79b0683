use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::{FieldViolation, ServiceError};
use thiserror::Error;
use tracing::error;

/// JSON error body returned by the catalog endpoints.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub code: Option<u16>,
    pub violations: Vec<FieldViolation>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<u16>,
    #[serde(skip_serializing_if = "no_violations")]
    violations: &'a [FieldViolation],
}

fn no_violations(v: &&[FieldViolation]) -> bool { v.is_empty() }

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, code: None, violations: Vec::new() }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = Some(e.code());
        match e {
            ServiceError::NotFound { .. } => Self { code, ..Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())) },
            ServiceError::InvalidField { ref violations, .. } => Self {
                code,
                violations: violations.clone(),
                ..Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            },
            ServiceError::Db(_) => {
                error!(err = %e, "catalog storage failure");
                Self { code, ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(e.to_string())) }
            }
        }
    }
}

/// Code for request bodies that never reach validation (bad JSON, missing or mistyped fields).
pub const MALFORMED_BODY_CODE: u16 = 2003;

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            code: Some(MALFORMED_BODY_CODE),
            ..Self::new(StatusCode::BAD_REQUEST, "Malformed Body", Some(rejection.body_text()))
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.title,
            detail: self.detail.as_deref(),
            code: self.code,
            violations: &self.violations,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
