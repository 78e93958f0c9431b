//! Cache module for refresh token records
//!
//! Redis holds the `subject_jti` records when several server instances share
//! sessions; the in-memory store covers single-instance runs and tests.

pub mod memory_store;
pub mod redis_client;
pub mod refresh_token_store;


pub use memory_store::InMemoryRefreshTokenStore;
pub use redis_client::RedisClient;
pub use refresh_token_store::RedisRefreshTokenStore;

// Re-export commonly used types
pub use wdc_shared::config::CacheConfig;
