//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::UserRole;

/// Suffix appended to the subject to form the refresh record key
pub const REFRESH_RECORD_SUFFIX: &str = "_jti";

/// Key under which the live refresh JTI of `subject` is stored
pub fn refresh_record_key(subject: &str) -> String {
    format!("{}{}", subject, REFRESH_RECORD_SUFFIX)
}

/// Kind of token, carried in the `token_type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived, presented on every request
    Access,
    /// Long-lived, only exchanged for a new token pair
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Role of the subject
    pub role: UserRole,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Access or refresh
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims valid from now for `ttl_seconds`, with a fresh JTI
    pub fn new(
        subject: impl Into<String>,
        role: UserRole,
        token_type: TokenType,
        issuer: impl Into<String>,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: subject.into(),
            role,
            jti: Uuid::new_v4().to_string(),
            token_type,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.into(),
        }
    }

    pub fn is_access(&self) -> bool {
        self.token_type == TokenType::Access
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == TokenType::Refresh
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// A freshly signed refresh token together with its JTI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub jti: String,
    /// Lifetime in seconds, also used as the store TTL
    pub expires_in: i64,
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,

    /// Always `Bearer`
    pub token_type: String,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_record_key() {
        assert_eq!(refresh_record_key("mung@dogcat.kr"), "mung@dogcat.kr_jti");
    }

    #[test]
    fn test_access_claims() {
        let claims = Claims::new("mung@dogcat.kr", UserRole::User, TokenType::Access, "withdogandcat", 900);

        assert_eq!(claims.sub, "mung@dogcat.kr");
        assert_eq!(claims.iss, "withdogandcat");
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(claims.is_access());
        assert!(!claims.is_refresh());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_have_unique_jti() {
        let a = Claims::new("a", UserRole::User, TokenType::Refresh, "iss", 60);
        let b = Claims::new("a", UserRole::User, TokenType::Refresh, "iss", 60);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new("a", UserRole::User, TokenType::Refresh, "iss", 60);
        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_wire_format() {
        let claims = Claims::new("a", UserRole::Admin, TokenType::Refresh, "iss", 60);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["role"], "ADMIN");
        assert_eq!(json["token_type"], "refresh");
        assert_eq!(json["sub"], "a");
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900, 604800);

        assert_eq!(pair.access_token, "access");
        assert_eq!(pair.refresh_token, "refresh");
        assert_eq!(pair.access_expires_in, 900);
        assert_eq!(pair.refresh_expires_in, 604800);
        assert_eq!(pair.token_type, "Bearer");
    }
}
