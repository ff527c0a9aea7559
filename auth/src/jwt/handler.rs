use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Claims as they appear on the wire, before the required fields are checked.
#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<serde_json::Value>,
    exp: Option<i64>,
    iat: Option<i64>,
}

/// JWT token handler for encoding and decoding access tokens.
///
/// The signing algorithm is pinned to HS256: the verifier only accepts tokens whose
/// header declares that algorithm, whatever else the token claims.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Every issuing and verifying party must hold the same secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT.
    ///
    /// Checks, in order: structure, declared algorithm, signature, `exp` presence and
    /// expiry, then `sub`.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a parsable JWT
    /// * `InvalidToken` - Wrong algorithm, bad signature or missing `exp`
    /// * `TokenExpired` - `exp` is not in the future
    /// * `MissingClaim` - `sub` is absent or not a string
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let raw = decode::<RawClaims>(token, &self.decoding_key, &validation)
            .map_err(classify)?
            .claims;

        let exp = raw
            .exp
            .ok_or_else(|| JwtError::InvalidToken("missing exp claim".to_string()))?;

        let sub = match raw.sub {
            Some(serde_json::Value::String(sub)) => sub,
            _ => return Err(JwtError::MissingClaim("sub".to_string())),
        };

        let claims = Claims {
            sub,
            exp,
            iat: raw.iat,
        };

        // The library compares with `exp < now`; a token is already dead at `exp`.
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

fn classify(error: JsonWebTokenError) -> JwtError {
    match error.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => JwtError::Malformed(error.to_string()),
        _ => JwtError::InvalidToken(error.to_string()),
    }
}
