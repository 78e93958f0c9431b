//! Refresh token store configuration

use serde::{Deserialize, Serialize};

/// Backing store for refresh token records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// Redis, shared between server instances
    Redis,
    /// Process-local map, single instance only
    Memory,
}

impl std::str::FromStr for TokenStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(TokenStoreKind::Redis),
            "memory" | "in-memory" | "inmemory" => Ok(TokenStoreKind::Memory),
            _ => Err(format!("Unknown token store: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Which store holds refresh token records
    pub store: TokenStoreKind,

    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every key
    #[serde(default)]
    pub key_prefix: String,

    /// Connection attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Sweep interval for the in-memory store in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            store: TokenStoreKind::Memory,
            url: String::from("redis://localhost:6379"),
            key_prefix: String::new(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            sweep_interval: default_sweep_interval(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let store = std::env::var("TOKEN_STORE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.store);
        let url = std::env::var("REDIS_URL").unwrap_or(defaults.url);
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").unwrap_or_default();
        let max_retries = std::env::var("REDIS_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_retries);

        Self {
            store,
            url,
            key_prefix,
            max_retries,
            ..defaults
        }
    }

    /// Create a Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            store: TokenStoreKind::Redis,
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_sweep_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("redis".parse::<TokenStoreKind>(), Ok(TokenStoreKind::Redis));
        assert_eq!("Memory".parse::<TokenStoreKind>(), Ok(TokenStoreKind::Memory));
        assert!("postgres".parse::<TokenStoreKind>().is_err());
    }

    #[test]
    fn test_redis_constructor() {
        let config = CacheConfig::redis("redis://cache:6379");
        assert_eq!(config.store, TokenStoreKind::Redis);
        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.max_retries, 3);
        assert!(config.key_prefix.is_empty());
    }
}
