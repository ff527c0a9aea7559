use std::sync::Arc;

use tonic::Status;

use crate::domain::account::errors::CredentialError;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;
use crate::domain::account::ports::CredentialServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<CS: CredentialServicePort>(
    service: Arc<CS>,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let username = Username::new(request.username).map_err(CredentialError::from)?;
    let password = Password::new(request.password).map_err(CredentialError::from)?;

    service
        .register(RegisterCommand::new(username, password, request.email))
        .await?;

    Ok(RegisterResponse {
        message: "User registered successfully".to_string(),
    })
}
