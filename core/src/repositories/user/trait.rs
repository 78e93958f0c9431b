//! Account directory trait used by login.

use async_trait::async_trait;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Read access to member accounts
///
/// Login resolves the account by email, which is also the token subject.
/// Implementations decide where accounts live; registration and profile
/// management are outside this crate.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Backend failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Check whether an account exists for `email`
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
