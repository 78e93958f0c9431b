//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Secret used when `JWT_SECRET` is not set. Rejected in production.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Clock skew tolerance in seconds applied to `exp` and `nbf`
    #[serde(default)]
    pub leeway: u64,

    /// HMAC algorithm for JWT signing (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_JWT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("withdogandcat"),
            leeway: 0,
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_JWT_SECRET
    }
}

/// Account provisioned at startup into the in-memory account directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    /// Role name (`USER` or `ADMIN`); `USER` when absent
    #[serde(default)]
    pub role: Option<String>,
}

impl SeedUser {
    /// Parse a single `email:password[:role]` entry
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.trim().splitn(3, ':');
        let email = parts.next()?.trim();
        let password = parts.next()?.trim();
        if email.is_empty() || password.is_empty() {
            return None;
        }
        let role = parts
            .next()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
            role,
        })
    }

    /// Parse a comma separated list, skipping malformed entries
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .filter_map(Self::parse)
            .collect()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Accounts loaded into the account directory at startup
    #[serde(default)]
    pub seed_users: Vec<SeedUser>,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_expiry);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_token_expiry);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);
        let leeway = std::env::var("JWT_LEEWAY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.leeway);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm);

        let seed_users = std::env::var("SEED_USERS")
            .map(|raw| SeedUser::parse_list(&raw))
            .unwrap_or_default();

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
                issuer,
                leeway,
                algorithm,
            },
            seed_users,
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
