//! Error types for authentication and token management

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed")]
    PasswordHashingFailed,
}

/// Token-related errors
///
/// Every variant except [`TokenError::TokenRevoked`] and
/// [`TokenError::TokenGenerationFailed`] means the presented token itself is
/// unusable (bad signature, malformed, expired, or the wrong kind).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Expected {expected} token, got {actual} token")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },

    /// Structurally valid refresh token whose JTI is no longer the stored one
    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// True when the token failed signature, format, time or type checks
    pub fn is_invalid_token(&self) -> bool {
        !matches!(
            self,
            TokenError::TokenRevoked | TokenError::TokenGenerationFailed
        )
    }

    /// True when the token was superseded, logged out, or never recorded
    pub fn is_revoked(&self) -> bool {
        matches!(self, TokenError::TokenRevoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_classification() {
        assert!(TokenError::TokenExpired.is_invalid_token());
        assert!(TokenError::InvalidSignature.is_invalid_token());
        assert!(TokenError::WrongTokenType {
            expected: TokenType::Refresh,
            actual: TokenType::Access,
        }
        .is_invalid_token());

        assert!(TokenError::TokenRevoked.is_revoked());
        assert!(!TokenError::TokenRevoked.is_invalid_token());
        assert!(!TokenError::TokenGenerationFailed.is_invalid_token());
    }

    #[test]
    fn test_wrong_type_message() {
        let err = TokenError::WrongTokenType {
            expected: TokenType::Refresh,
            actual: TokenType::Access,
        };
        assert_eq!(err.to_string(), "Expected refresh token, got access token");
    }
}
