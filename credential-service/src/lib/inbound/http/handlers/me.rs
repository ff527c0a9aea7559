use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSubject;

/// Echo the identity the bearer token asserts.
pub async fn me(
    Extension(authenticated): Extension<AuthenticatedSubject>,
) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            subject: authenticated.subject,
            expires_at: authenticated.expires_at,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}
