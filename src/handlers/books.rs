use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::services::book_service::{CreateBook, UpdateBook};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBook>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.books.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.books.get_by_id(id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::not_found("Book not found")),
    }
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.books.get_all().await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBook>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.books.update(id, payload).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
