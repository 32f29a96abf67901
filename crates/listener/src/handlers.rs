//! Request handlers.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use pipeline::{DispatchRequest, Relay, RelayError};
use tracing::warn;

use crate::response::{ApiError, DispatchResponse, HealthResponse};

/// `POST /dispatch`.
///
/// The body is decoded here rather than by the `Json` extractor so a
/// malformed payload is always a 400 regardless of `Content-Type`.
pub async fn dispatch(
    State(relay): State<Arc<Relay>>,
    body: Bytes,
) -> Result<Json<DispatchResponse>, ApiError> {
    let request: DispatchRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Error decoding payload");
        ApiError::from(RelayError::InvalidPayload)
    })?;

    let outcome = relay.handle(request).await?;
    Ok(Json(outcome.into()))
}

/// `GET /health`. Always 200.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Any method other than `POST` on `/dispatch`.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
