//! # Infrastructure Layer
//!
//! Concrete implementations of the core storage traits:
//!
//! - **Cache**: Redis client, the Redis-backed refresh token store, and a
//!   process-local store for single-instance deployments and tests
//! - **Repositories**: the in-memory account directory seeded at startup

use wdc_core::errors::DomainError;

/// Cache module - Redis client and refresh token stores
pub mod cache;

/// Repositories module - account directory implementations
pub mod repositories;

pub use cache::{InMemoryRefreshTokenStore, RedisClient, RedisRefreshTokenStore};
pub use repositories::InMemoryUserRepository;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
