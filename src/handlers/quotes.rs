use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::quote_service::{CreateQuote, UpdateQuote};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuote>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = state.quotes.create(payload).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.quotes.get_by_id(id).await? {
        Some(quote) => Ok(Json(quote)),
        None => Err(ApiError::not_found("Quote not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.quotes.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateQuote>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.quotes.update(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.quotes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
