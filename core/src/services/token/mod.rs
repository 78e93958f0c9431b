//! Token service module for JWT management
//!
//! This module handles signing, validating and decoding access and refresh
//! tokens. Persistence of refresh JTIs is the job of
//! [`RefreshTokenStore`](crate::repositories::RefreshTokenStore).

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
