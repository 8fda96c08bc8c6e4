use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::blog_post_thought_bubble_service::{
    CreateBlogPostThoughtBubble, UpdateBlogPostThoughtBubble,
};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBlogPostThoughtBubble>,
) -> Result<impl IntoResponse, ApiError> {
    let bubble = state.blog_post_thought_bubbles.create(payload).await?;
    Ok((StatusCode::CREATED, Json(bubble)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.blog_post_thought_bubbles.get_by_id(id).await? {
        Some(bubble) => Ok(Json(bubble)),
        None => Err(ApiError::not_found("Blog post thought bubble not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.blog_post_thought_bubbles.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlogPostThoughtBubble>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        state.blog_post_thought_bubbles.update(id, payload).await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.blog_post_thought_bubbles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
