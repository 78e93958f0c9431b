//! Refresh token store trait: the live refresh JTI of each subject.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DomainError;

/// Store holding at most one live refresh JTI per subject
///
/// Records are keyed by `subject + "_jti"` (see
/// [`refresh_record_key`](crate::domain::entities::token::refresh_record_key))
/// and expire after the refresh token lifetime. Writing a new JTI for a
/// subject revokes the refresh token that carried the previous one.
///
/// # Example
/// ```no_run
/// # use std::time::Duration;
/// # use wdc_core::repositories::RefreshTokenStore;
/// # async fn example(store: &dyn RefreshTokenStore) -> Result<(), wdc_core::errors::DomainError> {
/// let ttl = Duration::from_secs(7 * 24 * 3600);
/// store.set_jti("mung@dogcat.kr", "jti-1", ttl).await?;
///
/// // Rotation only succeeds while "jti-1" is still the live value
/// let rotated = store.compare_and_set("mung@dogcat.kr", "jti-1", "jti-2", ttl).await?;
/// assert!(rotated);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Current refresh JTI for `subject`
    ///
    /// # Returns
    /// * `Ok(Some(jti))` - A live record exists
    /// * `Ok(None)` - No record, or the record expired
    /// * `Err(DomainError)` - Store unavailable
    async fn get_jti(&self, subject: &str) -> Result<Option<String>, DomainError>;

    /// Overwrite the record for `subject` unconditionally
    ///
    /// Used on login, where any earlier session is replaced.
    async fn set_jti(&self, subject: &str, jti: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Replace the record only if it currently holds `expected_jti`
    ///
    /// The check and the write happen atomically, so of two callers racing
    /// with the same `expected_jti` at most one gets `Ok(true)`.
    ///
    /// # Returns
    /// * `Ok(true)` - Record swapped to `new_jti` with a fresh TTL
    /// * `Ok(false)` - Record missing or holding a different JTI; unchanged
    async fn compare_and_set(
        &self,
        subject: &str,
        expected_jti: &str,
        new_jti: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError>;

    /// Delete the record for `subject`
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing was stored
    async fn remove(&self, subject: &str) -> Result<bool, DomainError>;
}
