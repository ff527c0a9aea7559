//! Credential primitives for account services.
//!
//! Building blocks for services that issue or verify access tokens:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Access token signing and verification (HS256 JWT, algorithm pinned)
//! - Authentication coordination (verify password, then issue token)
//!
//! Services own their storage and error taxonomy and adapt these types at the edge.
//!
//! # Examples
//!
//! ## Hashing and checking a password
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Signing and decoding a token
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("alice", Duration::hours(24));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.subject(), "alice");
//! ```
//!
//! ## Register, log in, verify
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Registration stores only the hash
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login checks the password and signs a token for the subject
//! let result = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Any holder of the secret can check the token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.subject(), "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
