use std::sync::Arc;

use tonic::Status;

use crate::domain::account::models::LoginCommand;
use crate::domain::account::ports::CredentialServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<CS: CredentialServicePort>(
    service: Arc<CS>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let issued = service
        .login(LoginCommand::new(request.username, request.password))
        .await?;

    Ok(LoginResponse {
        token: issued.token,
        message: "Login successful".to_string(),
    })
}
