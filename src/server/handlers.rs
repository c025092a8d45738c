// ============================================================
// Layer 1 — HTTP Handlers
// ============================================================
//   GET  /health      → 200 {"status":"ok"}
//   GET  /model-info  → 200 {loaded, model_path, metrics_path, metrics}
//   POST /predict     → 200 {label, confidence}
//                       422 {detail}  empty text / bad body
//                       503 {detail}  no model loaded
//
// Every error body has the shape {"detail": "..."}.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::prediction::Prediction;
use crate::error::ClassifierError;
use crate::server::state::AppState;

// ─── Payloads ─────────────────────────────────────────────────────────────────
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub loaded:       bool,
    pub model_path:   String,
    pub metrics_path: String,
    /// The metrics record, or `{}` when none was written
    pub metrics:      Value,
}

// ─── Errors ───────────────────────────────────────────────────────────────────
/// An HTTP status plus the `detail` message sent back to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        let status = match &err {
            ClassifierError::InvalidInput(_)       => StatusCode::UNPROCESSABLE_ENTITY,
            ClassifierError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _                                      => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = match err {
            ClassifierError::ServiceUnavailable(msg) => msg,
            other => other.to_string(),
        };
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!("{detail}");
        }
        Self { status, detail }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Malformed JSON, wrong content type and missing fields are all 422
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, detail: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

// ─── Handlers ─────────────────────────────────────────────────────────────────
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn model_info(State(state): State<Arc<AppState>>) -> Result<Json<ModelInfo>, ApiError> {
    let metrics = match state.metrics() {
        Some(record) => serde_json::to_value(record).map_err(ClassifierError::from)?,
        None => json!({}),
    };
    let cfg = state.config();

    Ok(Json(ModelInfo {
        loaded:       state.is_loaded(),
        model_path:   cfg.model_path.display().to_string(),
        metrics_path: cfg.metrics_path.display().to_string(),
        metrics,
    }))
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(request) = payload?;
    if request.text.is_empty() {
        return Err(ClassifierError::InvalidInput(
            "text must contain at least 1 character".into(),
        )
        .into());
    }

    let prediction = state.predict(&request.text)?;
    tracing::debug!("Predicted '{}' ({:.3})", prediction.label, prediction.confidence);
    Ok(Json(prediction))
}
