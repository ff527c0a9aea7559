use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::register;
use super::handlers::verify_token;
use crate::domain::account::ports::CredentialServicePort;
use crate::proto::credential_service_server::CredentialService as CredentialServiceProto;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::VerifyTokenRequest;
use crate::proto::VerifyTokenResponse;

pub struct CredentialGrpcService<CS>
where
    CS: CredentialServicePort,
{
    service: Arc<CS>,
}

impl<CS> CredentialGrpcService<CS>
where
    CS: CredentialServicePort,
{
    pub fn new(service: Arc<CS>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<CS> CredentialServiceProto for CredentialGrpcService<CS>
where
    CS: CredentialServicePort,
{
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let response =
            verify_token::verify_token(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
