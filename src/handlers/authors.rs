use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::author_service::{CreateAuthor, UpdateAuthor};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateAuthor>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state.authors.create(payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.authors.get_by_id(id).await? {
        Some(author) => Ok(Json(author)),
        None => Err(ApiError::not_found("Author not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.authors.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAuthor>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.authors.update(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
