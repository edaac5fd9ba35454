/*
 * Responsibility
 * - GET /        (banner)
 * - GET /health  (liveness, never touches the store)
 * - GET /test    (store round-trip; 503 when it fails)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{error::AppError, state::AppState};

pub async fn root() -> impl IntoResponse {
    Json(json!({"message": "Ideas API running"}))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn store_check(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.store.ping().await.map_err(|e| {
        tracing::warn!(error = ?e, "store ping failed");
        AppError::StoreUnavailable
    })?;

    Ok(Json(json!({
        "status": "ok",
        "backend": state.store.backend_name(),
    })))
}
