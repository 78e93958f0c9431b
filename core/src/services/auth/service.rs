//! Main authentication service implementation

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::entities::account::UserRole;
use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshTokenStore, UserRepository};
use crate::services::token::TokenService;

use super::password::verify_password;

/// Session lifecycle: login, reissue, logout and access authentication
///
/// Each subject has at most one live refresh token, identified by the JTI
/// held in the [`RefreshTokenStore`]. Issuing a refresh token overwrites that
/// record, which implicitly revokes the previous refresh token.
pub struct AuthService<S, U>
where
    S: RefreshTokenStore + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Token codec
    token_service: Arc<TokenService>,
    /// Live refresh JTI per subject
    token_store: Arc<S>,
    /// Account lookup for login
    user_repository: Arc<U>,
}

impl<S, U> AuthService<S, U>
where
    S: RefreshTokenStore + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `token_service` - Signs and validates JWTs
    /// * `token_store` - Holds the live refresh JTI of every subject
    /// * `user_repository` - Resolves accounts by email on login
    pub fn new(
        token_service: Arc<TokenService>,
        token_store: Arc<S>,
        user_repository: Arc<U>,
    ) -> Self {
        Self {
            token_service,
            token_store,
            user_repository,
        }
    }

    /// Token codec used by this service
    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password both yield
    /// `AuthError::InvalidCredentials`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New access and refresh tokens; any earlier
    ///   refresh token of this account is revoked
    /// * `Err(DomainError)` - Bad credentials or store failure
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let account = match self.user_repository.find_by_email(email).await? {
            Some(account) => account,
            None => {
                debug!("Login rejected: unknown account {}", email);
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        let password = password.to_string();
        let hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password check aborted: {}", e)))?;

        if !matches {
            debug!("Login rejected: wrong password for {}", email);
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        info!("User logged in: {}", account.subject());
        self.issue_tokens(account.subject(), account.role).await
    }

    /// Mint a token pair for `subject` and record its refresh JTI
    ///
    /// The store record is overwritten unconditionally.
    pub async fn issue_tokens(&self, subject: &str, role: UserRole) -> DomainResult<TokenPair> {
        let access_token = self.token_service.create_access_token(subject, role)?;
        let refresh = self.token_service.create_refresh_token(subject, role)?;

        self.token_store
            .set_jti(subject, &refresh.jti, ttl_from_seconds(refresh.expires_in))
            .await?;

        debug!("Issued token pair for {}", subject);

        Ok(TokenPair::new(
            access_token,
            refresh.token,
            self.token_service.access_token_ttl(),
            refresh.expires_in,
        ))
    }

    /// Exchange a valid refresh token for a new access and refresh pair
    ///
    /// 1. Validate signature, expiry and that it is a refresh token
    /// 2. Extract the JTI and subject
    /// 3. Require the stored JTI for the subject to equal the presented one
    /// 4. Mint a new pair and swap the stored JTI to the new refresh JTI
    ///
    /// The swap in step 4 is a compare-and-set against the presented JTI, so
    /// when the same refresh token is presented concurrently only one call
    /// succeeds; the others fail with `TokenRevoked`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Rotated tokens; the presented refresh token is
    ///   now superseded
    /// * `Err(TokenError)` - Invalid, expired, wrong-typed, superseded or
    ///   unrecorded token. No token is returned on failure.
    pub async fn reissue(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self
            .token_service
            .validate_token(refresh_token, TokenType::Refresh)?;

        let stored_jti = self.token_store.get_jti(&claims.sub).await?;
        match stored_jti {
            Some(ref jti) if *jti == claims.jti => {}
            Some(_) => {
                warn!("Superseded refresh token presented for {}", claims.sub);
                return Err(DomainError::Token(TokenError::TokenRevoked));
            }
            None => {
                warn!("Refresh token presented for {} with no live record", claims.sub);
                return Err(DomainError::Token(TokenError::TokenRevoked));
            }
        }

        let access_token = self
            .token_service
            .create_access_token(&claims.sub, claims.role)?;
        let refresh = self
            .token_service
            .create_refresh_token(&claims.sub, claims.role)?;

        let swapped = self
            .token_store
            .compare_and_set(
                &claims.sub,
                &claims.jti,
                &refresh.jti,
                ttl_from_seconds(refresh.expires_in),
            )
            .await?;

        if !swapped {
            warn!("Concurrent reissue lost for {}", claims.sub);
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        info!("Reissued tokens for {}", claims.sub);

        Ok(TokenPair::new(
            access_token,
            refresh.token,
            self.token_service.access_token_ttl(),
            refresh.expires_in,
        ))
    }

    /// Drop the stored refresh JTI of `subject`
    ///
    /// The subject's current refresh token stops reissuing immediately.
    /// Access tokens already handed out stay valid until they expire.
    /// Logging out twice is not an error.
    pub async fn logout(&self, subject: &str) -> DomainResult<()> {
        let removed = self.token_store.remove(subject).await?;
        if removed {
            info!("User logged out: {}", subject);
        } else {
            debug!("Logout for {} found no live refresh token", subject);
        }
        Ok(())
    }

    /// Validate an access token presented on a protected route
    pub fn authenticate(&self, access_token: &str) -> DomainResult<Claims> {
        self.token_service
            .validate_token(access_token, TokenType::Access)
    }
}

fn ttl_from_seconds(seconds: i64) -> Duration {
    Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
}
