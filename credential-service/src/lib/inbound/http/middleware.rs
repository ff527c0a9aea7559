use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use super::handlers::ApiError;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Identity from a verified bearer token, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}

/// Middleware that verifies the bearer token and adds the subject to request extensions
pub async fn authenticate<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?.to_string();

    let verified = state
        .credential_service
        .verify_token(&token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedSubject {
        subject: verified.subject,
        expires_at: verified.expires_at,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
