//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{hash_password_with_cost, DEFAULT_PASSWORD_COST, verify_password, AuthService};
pub use token::{TokenService, TokenServiceConfig};
