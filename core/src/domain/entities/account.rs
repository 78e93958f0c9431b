//! Account entity representing a member who can log in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization role carried in every token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Regular community member
    #[default]
    User,
    /// Operator with moderation rights
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USER" | "ROLE_USER" => Ok(UserRole::User),
            "ADMIN" | "ROLE_ADMIN" => Ok(UserRole::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A member account. The email is the token subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login identifier, also used as the JWT `sub`
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    pub nickname: Option<String>,

    pub role: UserRole,

    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account from an already hashed password
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            nickname: None,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Token subject for this account
    pub fn subject(&self) -> &str {
        &self.email
    }
}
