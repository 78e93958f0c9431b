//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::domain::entities::account::UserRole;
use crate::domain::entities::token::{Claims, IssuedRefreshToken, TokenType};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Signs and validates access and refresh JWTs
///
/// Validation is pure computation over the token string, so one instance can
/// be shared across request handlers.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `DomainError::Validation` when the secret is
    /// empty or the algorithm is not an HMAC algorithm
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Validation {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "sub", "iss"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = config.leeway_seconds;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl(&self) -> i64 {
        self.config.access_token_ttl_seconds
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_ttl(&self) -> i64 {
        self.config.refresh_token_ttl_seconds
    }

    /// Signs a new access token for `subject`
    pub fn create_access_token(&self, subject: &str, role: UserRole) -> DomainResult<String> {
        let claims = Claims::new(
            subject,
            role,
            TokenType::Access,
            self.config.issuer.as_str(),
            self.config.access_token_ttl_seconds,
        );
        self.encode_claims(&claims)
    }

    /// Signs a new refresh token for `subject` with a fresh JTI
    ///
    /// The caller is responsible for recording the returned JTI in the
    /// refresh token store; an unrecorded refresh token never reissues.
    pub fn create_refresh_token(
        &self,
        subject: &str,
        role: UserRole,
    ) -> DomainResult<IssuedRefreshToken> {
        let claims = Claims::new(
            subject,
            role,
            TokenType::Refresh,
            self.config.issuer.as_str(),
            self.config.refresh_token_ttl_seconds,
        );
        let token = self.encode_claims(&claims)?;

        Ok(IssuedRefreshToken {
            token,
            jti: claims.jti,
            expires_in: self.config.refresh_token_ttl_seconds,
        })
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a token and returns its claims
    ///
    /// Checks the signature, `exp`, `nbf`, `iss` and that the `token_type`
    /// claim matches `expected`.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is expired, tampered, malformed, or of
    ///   the wrong type
    pub fn validate_token(&self, token: &str, expected: TokenType) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                DomainError::Token(map_jwt_error(e.kind()))
            })?;

        let claims = token_data.claims;
        if claims.token_type != expected {
            debug!(
                "Token type mismatch for subject {}: expected {}, got {}",
                claims.sub, expected, claims.token_type
            );
            return Err(DomainError::Token(TokenError::WrongTokenType {
                expected,
                actual: claims.token_type,
            }));
        }

        Ok(claims)
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidIssuer
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::InvalidSubject
        | ErrorKind::Json(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}
