use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::verify_token::verify_token;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::CredentialServicePort;

pub struct AppState<CS: CredentialServicePort> {
    pub credential_service: Arc<CS>,
}

impl<CS: CredentialServicePort> Clone for AppState<CS> {
    fn clone(&self) -> Self {
        Self {
            credential_service: Arc::clone(&self.credential_service),
        }
    }
}

pub fn create_router<CS: CredentialServicePort>(credential_service: Arc<CS>) -> Router {
    let state = AppState { credential_service };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register::<CS>))
        .route("/api/auth/login", post(login::<CS>))
        .route("/api/auth/verify", post(verify_token::<CS>));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<CS>,
        ));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Authenticator;
    use axum::http::header;
    use axum::http::StatusCode;
    use serde_json::json;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::account::service::CredentialService;
    use crate::outbound::repositories::InMemoryAccountRepository;

    fn router() -> Router {
        let service = CredentialService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(Authenticator::new(b"router-test-secret-of-at-least-32-bytes")),
            2,
        );
        create_router(Arc::new(service))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_rejects_empty_username() {
        let response = router()
            .oneshot(json_request(
                "/api/auth/register",
                json!({ "username": "", "password": "pw123", "email": "a@x.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["status_code"], 422);
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("Username must not be empty"));
    }

    #[tokio::test]
    async fn test_register_missing_field_uses_error_envelope() {
        let response = router()
            .oneshot(json_request(
                "/api/auth/register",
                json!({ "username": "alice" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["status_code"], 422);
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("password"));
    }

    #[tokio::test]
    async fn test_login_invalid_json_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status_code"], 400);
        assert!(body["data"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_verify_without_json_content_type_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/verify")
            .body(Body::from(r#"{"token":"abc"}"#))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status_code"], 400);
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let request = Request::builder()
            .uri("/api/auth/me")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["message"], "Missing Authorization header");
    }

    #[tokio::test]
    async fn test_me_rejects_non_bearer_scheme() {
        let request = Request::builder()
            .uri("/api/auth/me")
            .header(header::AUTHORIZATION, "Basic YWxpY2U6cHcxMjM=")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_token() {
        let response = router()
            .oneshot(json_request(
                "/api/auth/verify",
                json!({ "token": "garbage" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert!(body["data"].get("subject").is_none());
    }
}
