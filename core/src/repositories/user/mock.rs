//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::account::{Account, UserRole};
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add an account whose password is hashed with a low bcrypt cost
    pub async fn add_account(&self, email: &str, password: &str, role: UserRole) -> Account {
        let hash = bcrypt::hash(password, 4).expect("bcrypt hash");
        let account = Account::new(email, hash, role);
        self.accounts
            .write()
            .await
            .insert(email.to_string(), account.clone());
        account
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }
}
