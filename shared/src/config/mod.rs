//! Configuration module
//!
//! - `auth` - JWT signing and seeded accounts
//! - `cache` - refresh token store (Redis or in-memory)
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server and CORS

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, SeedUser};
pub use cache::{CacheConfig, TokenStoreKind};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Configuration rejected at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in production")]
    DefaultSecretInProduction,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Upper bound for any token lifetime (ten years)
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Reject configurations that cannot run safely
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecretInProduction);
        }
        check_expiry("JWT_ACCESS_TOKEN_EXPIRY", self.auth.jwt.access_token_expiry)?;
        check_expiry("JWT_REFRESH_TOKEN_EXPIRY", self.auth.jwt.refresh_token_expiry)?;
        Ok(())
    }
}

fn check_expiry(field: &str, seconds: i64) -> Result<(), ConfigError> {
    let reason = if seconds <= 0 {
        "must be positive".to_string()
    } else if seconds > MAX_TOKEN_EXPIRY_SECONDS {
        format!("must not exceed {} seconds", MAX_TOKEN_EXPIRY_SECONDS)
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    })
}
