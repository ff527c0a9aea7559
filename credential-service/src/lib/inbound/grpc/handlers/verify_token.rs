use std::sync::Arc;

use tonic::Status;

use crate::domain::account::ports::CredentialServicePort;
use crate::proto::VerifyTokenRequest;
use crate::proto::VerifyTokenResponse;

pub async fn verify_token<CS: CredentialServicePort>(
    service: Arc<CS>,
    request: VerifyTokenRequest,
) -> Result<VerifyTokenResponse, Status> {
    let verified = service.verify_token(&request.token).await?;

    Ok(VerifyTokenResponse {
        valid: true,
        message: "Token is valid".to_string(),
        subject: verified.subject,
    })
}
