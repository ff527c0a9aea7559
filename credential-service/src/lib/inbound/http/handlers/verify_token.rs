use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn verify_token<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
    payload: Result<Json<VerifyTokenRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<VerifyTokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let verified = state.credential_service.verify_token(&body.token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        VerifyTokenResponseData {
            valid: true,
            message: "Token is valid".to_string(),
            subject: verified.subject,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyTokenRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyTokenResponseData {
    pub valid: bool,
    pub message: String,
    pub subject: String,
}
