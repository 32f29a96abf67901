//! JSON response bodies and error-to-response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeline::{RelayError, RelayOutcome};
use serde::{Deserialize, Serialize};

/// Body of a 200 answer from `POST /dispatch`.
///
/// The `status` field distinguishes a completed dispatch from a skipped one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchResponse {
    /// The event was accepted by the target repository.
    Success {
        /// The deployment tag that was forwarded.
        #[serde(rename = "commitHash")]
        commit_hash: String,
        /// The application the tag belongs to.
        #[serde(rename = "sourceName")]
        source_name: String,
    },
    /// The application was ignored.
    Skipped {
        /// Why no dispatch was attempted.
        reason: String,
    },
}

impl From<RelayOutcome> for DispatchResponse {
    fn from(outcome: RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Skipped { reason } => Self::Skipped { reason },
            RelayOutcome::Dispatched {
                commit_hash,
                source_name,
            } => Self::Success {
                commit_hash: commit_hash.as_str().to_string(),
                source_name: source_name.as_str().to_string(),
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
}

impl HealthResponse {
    /// The only health answer the relay gives.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Body of every error answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,
    /// Human-readable description. Never contains a credential.
    pub error: String,
}

/// An error answer: status code plus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error answer with the given status code.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 405 for any method other than `POST` on `/dispatch`.
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    /// HTTP status code of the answer.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in the `error` field.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
