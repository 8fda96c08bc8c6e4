use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::review_service::{CreateReview, UpdateReview};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateReview>,
) -> Result<impl IntoResponse, ApiError> {
    let review = state.reviews.create(payload).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.reviews.get_by_id(id).await? {
        Some(review) => Ok(Json(review)),
        None => Err(ApiError::not_found("Review not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reviews.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReview>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.reviews.update(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.reviews.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
