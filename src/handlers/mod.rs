pub mod protected;
pub mod public;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::time::Duration;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let timeout = Duration::from_millis(state.config.database.query_timeout_ms);

    match DatabaseManager::health_check(&state.pool, timeout).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("no such route")
}
