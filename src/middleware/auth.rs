use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::config::AuthStatusPolicy;
use crate::error::ApiError;
use crate::state::AppState;

/// Verified caller identity, attached to request extensions by
/// [`require_auth`] and read by downstream stages and handlers.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            is_admin: claims.admin,
        }
    }
}

/// Stage A: extract the bearer token, verify it, attach the claims.
///
/// Every rejection is terminal; the wrapped handler never runs. A missing
/// token is always 401, a rejected token answers per the configured
/// [`AuthStatusPolicy`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()) else {
        return Err(ApiError::unauthorized("no token provided"));
    };

    match state.auth.verify(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser::from(claims));
            Ok(next.run(request).await)
        }
        Err(rejection) => Err(match state.status_policy {
            AuthStatusPolicy::LegacyAsymmetric => ApiError::forbidden(rejection.to_string()),
            AuthStatusPolicy::Uniform401 => ApiError::unauthorized(rejection.to_string()),
        }),
    }
}

/// Stage B: admit only callers whose verified claims carry the admin flag.
/// Runs strictly after [`require_auth`] has populated the extensions.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin => Ok(next.run(request).await),
        _ => Err(ApiError::forbidden("Unauthorized: Admin access required")),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, HeaderValue, Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::testing::test_state;

    async fn ping(Extension(user): Extension<AuthUser>) -> String {
        format!("user {}", user.user_id)
    }

    fn admin_app(state: AppState) -> Router {
        Router::new()
            .route("/admin/ping", get(ping))
            .route_layer(middleware::from_fn(require_admin))
            .route_layer(middleware::from_fn_with_state(state, require_auth))
    }

    fn request(token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/admin/ping");
        if let Some(token) = token {
            builder = builder.header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
            );
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_token_answers_401_before_handler() {
        let state = test_state(AuthStatusPolicy::LegacyAsymmetric);
        let response = admin_app(state).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({"error": "no token provided"}));
    }

    #[tokio::test]
    async fn garbage_token_answers_403_under_legacy_policy() {
        let state = test_state(AuthStatusPolicy::LegacyAsymmetric);
        let response = admin_app(state)
            .oneshot(request(Some("garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await, json!({"error": "invalid token"}));
    }

    #[tokio::test]
    async fn garbage_token_answers_401_under_uniform_policy() {
        let state = test_state(AuthStatusPolicy::Uniform401);
        let response = admin_app(state)
            .oneshot(request(Some("garbage")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({"error": "invalid token"}));
    }

    #[tokio::test]
    async fn expired_token_is_distinguished_from_invalid() {
        let state = test_state(AuthStatusPolicy::LegacyAsymmetric);
        let token = crate::testing::expired_token(1, true);
        let response = admin_app(state)
            .oneshot(request(Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await, json!({"error": "token is expired"}));
    }

    #[tokio::test]
    async fn non_admin_token_is_rejected_at_stage_b() {
        let state = test_state(AuthStatusPolicy::LegacyAsymmetric);
        let token = state.auth.token_codec().issue(1, false).unwrap();
        let response = admin_app(state)
            .oneshot(request(Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Unauthorized: Admin access required"})
        );
    }

    #[tokio::test]
    async fn admin_token_reaches_handler_with_claims_attached() {
        let state = test_state(AuthStatusPolicy::LegacyAsymmetric);
        let token = state.auth.token_codec().issue(42, true).unwrap();
        let response = admin_app(state)
            .oneshot(request(Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"user 42");
    }

    #[tokio::test]
    async fn non_bearer_scheme_counts_as_no_token() {
        let state = test_state(AuthStatusPolicy::LegacyAsymmetric);
        let req = HttpRequest::builder()
            .uri("/admin/ping")
            .header(header::AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0")
            .body(Body::empty())
            .unwrap();
        let response = admin_app(state).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({"error": "no token provided"}));
    }
}
