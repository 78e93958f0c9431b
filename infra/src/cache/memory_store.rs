//! Process-local refresh token store
//!
//! Suitable for a single server instance. Records carry a deadline; reads
//! ignore expired records and a background sweeper drops them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use wdc_core::domain::entities::token::refresh_record_key;
use wdc_core::errors::DomainError;
use wdc_core::repositories::RefreshTokenStore;

/// Deadline used when `now + ttl` does not fit in an `Instant`
const MAX_RECORD_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct Record {
    jti: String,
    expires_at: Instant,
}

impl Record {
    fn new(jti: &str, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            jti: jti.to_string(),
            expires_at: now
                .checked_add(ttl)
                .unwrap_or_else(|| now + MAX_RECORD_TTL),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory refresh token store keyed by `subject_jti`
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStore {
    records: RwLock<HashMap<String, Record>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired record, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.is_live(now));
        before - records.len()
    }

    /// Number of records held, expired ones included until swept
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Purge expired records every `interval` in a background task
    ///
    /// The task holds a weak reference and ends once the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    debug!("Refresh token store dropped, sweeper exiting");
                    break;
                };
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!("Purged {} expired refresh token records", purged);
                }
            }
        })
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn get_jti(&self, subject: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        let records = self.records.read().await;
        Ok(records
            .get(&refresh_record_key(subject))
            .filter(|record| record.is_live(now))
            .map(|record| record.jti.clone()))
    }

    async fn set_jti(&self, subject: &str, jti: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(refresh_record_key(subject), Record::new(jti, ttl));
        Ok(())
    }

    async fn compare_and_set(
        &self,
        subject: &str,
        expected_jti: &str,
        new_jti: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError> {
        let now = Instant::now();
        let key = refresh_record_key(subject);
        let mut records = self.records.write().await;

        match records.get(&key) {
            Some(record) if record.is_live(now) && record.jti == expected_jti => {
                records.insert(key, Record::new(new_jti, ttl));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove(&self, subject: &str) -> Result<bool, DomainError> {
        let now = Instant::now();
        let mut records = self.records.write().await;
        Ok(records
            .remove(&refresh_record_key(subject))
            .is_some_and(|record| record.is_live(now)))
    }
}
