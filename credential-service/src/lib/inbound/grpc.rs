pub mod credential_server;
pub mod handlers;

pub use credential_server::CredentialGrpcService;
