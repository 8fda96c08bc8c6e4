use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::book_thought_bubble_service::{
    CreateBookThoughtBubble, UpdateBookThoughtBubble,
};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookThoughtBubble>,
) -> Result<impl IntoResponse, ApiError> {
    let bubble = state.book_thought_bubbles.create(payload).await?;
    Ok((StatusCode::CREATED, Json(bubble)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.book_thought_bubbles.get_by_id(id).await? {
        Some(bubble) => Ok(Json(bubble)),
        None => Err(ApiError::not_found("Book thought bubble not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.book_thought_bubbles.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookThoughtBubble>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.book_thought_bubbles.update(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.book_thought_bubbles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
