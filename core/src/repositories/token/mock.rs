//! Mock implementation of RefreshTokenStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::token::refresh_record_key;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenStore;

/// Mock refresh token store for testing
///
/// Records never expire; TTLs are captured so tests can assert on them.
pub struct MockRefreshTokenStore {
    records: Arc<RwLock<HashMap<String, (String, Duration)>>>,
    fail: AtomicBool,
}

impl MockRefreshTokenStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail as if the backend were down
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// TTL recorded with the last write for `subject`
    pub async fn ttl_of(&self, subject: &str) -> Option<Duration> {
        let records = self.records.read().await;
        records.get(&refresh_record_key(subject)).map(|(_, ttl)| *ttl)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockRefreshTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenStore for MockRefreshTokenStore {
    async fn get_jti(&self, subject: &str) -> Result<Option<String>, DomainError> {
        self.check()?;
        let records = self.records.read().await;
        Ok(records
            .get(&refresh_record_key(subject))
            .map(|(jti, _)| jti.clone()))
    }

    async fn set_jti(&self, subject: &str, jti: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        records.insert(refresh_record_key(subject), (jti.to_string(), ttl));
        Ok(())
    }

    async fn compare_and_set(
        &self,
        subject: &str,
        expected_jti: &str,
        new_jti: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        let key = refresh_record_key(subject);

        match records.get(&key) {
            Some((current, _)) if current == expected_jti => {
                records.insert(key, (new_jti.to_string(), ttl));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove(&self, subject: &str) -> Result<bool, DomainError> {
        self.check()?;
        let mut records = self.records.write().await;
        Ok(records.remove(&refresh_record_key(subject)).is_some())
    }
}
