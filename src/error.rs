use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::services::ServiceError;

/// HTTP boundary error. Bodies are always `{"error": <message>}`, the wire
/// format existing clients parse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => ApiError::bad_request(msg),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Database(db_err) => {
                // Log the real error but keep the response generic.
                tracing::error!("database error: {}", db_err);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => ApiError::bad_request(msg),
            AuthError::Conflict => ApiError::bad_request("username already taken"),
            AuthError::Store(store_err) => {
                tracing::error!("credential store error: {}", store_err);
                ApiError::internal("An error occurred while processing your request")
            }
            AuthError::Hash(hash_err) => {
                tracing::error!("password hashing error: {}", hash_err);
                ApiError::internal("An error occurred while processing your request")
            }
            AuthError::Join(join_err) => {
                tracing::error!("hashing task error: {}", join_err);
                ApiError::internal("An error occurred while processing your request")
            }
            AuthError::Token(token_err) => {
                tracing::error!("token generation error: {}", token_err);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_use_the_error_key() {
        let err = ApiError::not_found("Book not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({"error": "Book not found"}));
    }

    #[test]
    fn auth_conflict_maps_to_400() {
        let err: ApiError = AuthError::Conflict.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn service_validation_maps_to_400_and_not_found_to_404() {
        let err: ApiError = ServiceError::Validation("bad input".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = ServiceError::NotFound("Author not found".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
