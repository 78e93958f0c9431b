//! Shared configuration and response types for the WithDogAndCat server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error response envelope and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, Environment, JwtConfig, LogFormat,
    LoggingConfig, SeedUser, ServerConfig, TokenStoreKind,
};
pub use errors::{error_codes, ErrorResponse};
