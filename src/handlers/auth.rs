use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/register - create a user, answering the record without the
/// password hash.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .auth
        .register(&payload.username, &payload.password, payload.is_admin)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - answer `{"token": ...}` or a uniform 401 that does not
/// reveal which half of the pair was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match state.auth.login(&payload.username, &payload.password).await? {
        Some(token) => Ok(Json(json!({ "token": token }))),
        None => Err(ApiError::unauthorized("Invalid credentials")),
    }
}

/// POST /admin/login - same flow as [`login`]; kept as a separate endpoint
/// with its historical failure message.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match state.auth.login(&payload.username, &payload.password).await? {
        Some(token) => Ok(Json(json!({ "token": token }))),
        None => Err(ApiError::unauthorized("invalid creds")),
    }
}
