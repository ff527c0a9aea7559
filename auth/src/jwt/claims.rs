use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Exactly two claims are mandatory: the subject (`sub`, the username the token
/// asserts) and the expiry (`exp`, Unix seconds). `iat` is informational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims with an absolute expiry.
    pub fn new(subject: impl ToString, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: None,
        }
    }

    /// Create claims issued now that expire after `lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `lifetime` - Time until expiry
    ///
    /// # Returns
    /// Claims with sub, exp and iat set
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self::new(subject, now + lifetime).with_issued_at(now.timestamp())
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Expiry as a timestamp, `None` if `exp` is outside chrono's range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }

    /// A token is valid strictly before `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice", Duration::hours(24));

        assert_eq!(claims.subject(), "alice");
        let iat = claims.iat.expect("iat should be set");
        assert_eq!(claims.exp - iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("alice", DateTime::<Utc>::from_timestamp(1000, 0).unwrap());

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_iat_omitted_when_unset() {
        let claims = Claims::new("alice", DateTime::<Utc>::from_timestamp(1000, 0).unwrap());
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json, serde_json::json!({ "sub": "alice", "exp": 1000 }));
    }
}
