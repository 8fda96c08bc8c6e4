use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::blog_post_service::{CreateBlogPost, UpdateBlogPost};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBlogPost>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.blog_posts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.blog_posts.get_by_id(id).await? {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::not_found("Blog post not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.blog_posts.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlogPost>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.blog_posts.update(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.blog_posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
