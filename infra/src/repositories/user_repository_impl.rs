//! In-memory account directory
//!
//! Accounts are loaded once at startup from `SEED_USERS`; registration is
//! handled elsewhere, so the directory is read-mostly.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use wdc_core::domain::entities::account::{Account, UserRole};
use wdc_core::errors::DomainError;
use wdc_core::repositories::UserRepository;
use wdc_core::services::auth::hash_password_with_cost;
use wdc_shared::config::SeedUser;

use crate::InfrastructureError;

/// Accounts keyed by email
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from seed entries, hashing each password with bcrypt
    ///
    /// # Arguments
    /// * `seeds` - Parsed `email:password[:role]` entries
    /// * `cost` - bcrypt cost factor
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - A seed names an unknown role
    /// * `Err(InfrastructureError::General)` - Hashing failed
    pub fn from_seed(seeds: &[SeedUser], cost: u32) -> Result<Self, InfrastructureError> {
        let mut accounts = HashMap::with_capacity(seeds.len());

        for seed in seeds {
            let role = match seed.role.as_deref() {
                Some(name) => name.parse::<UserRole>().map_err(|_| {
                    InfrastructureError::Config(format!(
                        "Unknown role '{}' for seed user {}",
                        name, seed.email
                    ))
                })?,
                None => UserRole::default(),
            };
            let hash = hash_password_with_cost(&seed.password, cost)
                .map_err(|e| InfrastructureError::General(e.to_string()))?;

            if accounts
                .insert(seed.email.clone(), Account::new(seed.email.as_str(), hash, role))
                .is_some()
            {
                warn!("Duplicate seed user {}, keeping the last entry", seed.email);
            }
        }

        info!("Loaded {} seed accounts", accounts.len());

        Ok(Self {
            accounts: RwLock::new(accounts),
        })
    }

    /// Add or replace an account
    pub async fn insert(&self, account: Account) {
        self.accounts
            .write()
            .await
            .insert(account.email.clone(), account);
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdc_core::services::auth::verify_password;

    fn seeds() -> Vec<SeedUser> {
        SeedUser::parse_list("mung@dogcat.kr:woof-1234,boss@dogcat.kr:meow-5678:ADMIN")
    }

    #[tokio::test]
    async fn test_from_seed_hashes_passwords() {
        let repo = InMemoryUserRepository::from_seed(&seeds(), 4).unwrap();
        assert_eq!(repo.len().await, 2);

        let account = repo.find_by_email("mung@dogcat.kr").await.unwrap().unwrap();
        assert_ne!(account.password_hash, "woof-1234");
        assert!(verify_password("woof-1234", &account.password_hash));
        assert_eq!(account.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_from_seed_reads_role() {
        let repo = InMemoryUserRepository::from_seed(&seeds(), 4).unwrap();

        let account = repo.find_by_email("boss@dogcat.kr").await.unwrap().unwrap();
        assert_eq!(account.role, UserRole::Admin);
    }

    #[test]
    fn test_from_seed_rejects_unknown_role() {
        let seeds = SeedUser::parse_list("x@dogcat.kr:pw:OWNER");
        let result = InMemoryUserRepository::from_seed(&seeds, 4);
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_email("nobody@dogcat.kr").await.unwrap().is_none());
        assert!(!repo.exists_by_email("nobody@dogcat.kr").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert() {
        let repo = InMemoryUserRepository::new();
        repo.insert(Account::new("a@dogcat.kr", "hash", UserRole::User)).await;

        assert!(repo.exists_by_email("a@dogcat.kr").await.unwrap());
    }
}
