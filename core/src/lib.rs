//! # WithDogAndCat Core
//!
//! Domain layer for authentication: token claims, the refresh token store
//! abstraction, the account directory, and the services that issue, validate
//! and rotate JWTs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, Claims, TokenPair, TokenType, UserRole};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{RefreshTokenStore, UserRepository};
pub use services::{AuthService, TokenService, TokenServiceConfig};
