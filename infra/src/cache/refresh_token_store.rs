//! Redis-backed refresh token store
//!
//! Each subject's live refresh JTI is stored under
//! `<prefix><subject>_jti` with the refresh token lifetime as TTL, so records
//! disappear on their own once the refresh token they describe has expired.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use wdc_core::domain::entities::token::refresh_record_key;
use wdc_core::errors::DomainError;
use wdc_core::repositories::RefreshTokenStore;

use super::redis_client::RedisClient;

/// Refresh token store shared by every server instance through Redis
#[derive(Clone)]
pub struct RedisRefreshTokenStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRefreshTokenStore {
    /// Create a store over `client`, prepending `key_prefix` to every key
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Full Redis key for `subject`
    pub fn key_for(&self, subject: &str) -> String {
        prefixed_key(&self.key_prefix, subject)
    }

    /// Underlying client, for health checks
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

pub(crate) fn prefixed_key(prefix: &str, subject: &str) -> String {
    format!("{}{}", prefix, refresh_record_key(subject))
}

/// Redis rejects `EX 0`, so sub-second TTLs round up
pub(crate) fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    async fn get_jti(&self, subject: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.key_for(subject)).await?)
    }

    async fn set_jti(&self, subject: &str, jti: &str, ttl: Duration) -> Result<(), DomainError> {
        let key = self.key_for(subject);
        self.client
            .set_with_expiry(&key, jti, ttl_seconds(ttl))
            .await?;
        debug!("Stored refresh JTI for {}", subject);
        Ok(())
    }

    async fn compare_and_set(
        &self,
        subject: &str,
        expected_jti: &str,
        new_jti: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError> {
        let key = self.key_for(subject);
        Ok(self
            .client
            .compare_and_set(&key, expected_jti, new_jti, ttl_seconds(ttl))
            .await?)
    }

    async fn remove(&self, subject: &str) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.key_for(subject)).await?)
    }
}
