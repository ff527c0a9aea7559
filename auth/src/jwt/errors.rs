use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Token could not be parsed (structure, base64 or JSON).
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    TokenExpired,

    /// Signature, algorithm or registered-claim validation failed.
    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
