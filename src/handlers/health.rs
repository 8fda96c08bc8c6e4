use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::database;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database_error": e.to_string() })),
        ),
    }
}
