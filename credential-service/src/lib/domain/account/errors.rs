use auth::AuthenticationError;
use auth::JwtError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("Password must not be empty")]
    Empty,
}

/// Top-level error for all credential operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    // Input validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    // Domain-level errors
    #[error("Username already exists: {0}")]
    AlreadyExists(String),

    #[error("No user found with this username: {0}")]
    NotFound(String),

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    Unauthenticated(String),

    #[error("Unable to parse token: {0}")]
    Malformed(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JwtError> for CredentialError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Malformed(msg) => CredentialError::Malformed(msg),
            JwtError::InvalidToken(_) | JwtError::TokenExpired => {
                CredentialError::Unauthenticated(err.to_string())
            }
            JwtError::MissingClaim(_) | JwtError::EncodingFailed(_) => {
                CredentialError::Internal(err.to_string())
            }
        }
    }
}

impl From<AuthenticationError> for CredentialError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => CredentialError::InvalidCredentials,
            // A stored hash we cannot read is corruption, not a user mistake.
            AuthenticationError::PasswordError(e) => {
                CredentialError::Internal(format!("Stored password hash is unusable: {}", e))
            }
            AuthenticationError::JwtError(e) => {
                CredentialError::Internal(format!("Failed to generate JWT: {}", e))
            }
        }
    }
}
