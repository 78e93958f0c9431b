//! Authentication service module
//!
//! This module provides the session lifecycle on top of the token service:
//! - Login with email and password
//! - Refresh token reissue with rotation-based revocation
//! - Logout by dropping the stored refresh JTI
//! - Access token authentication for protected routes

mod password;
mod service;


pub use password::{hash_password_with_cost, DEFAULT_PASSWORD_COST, verify_password};
pub use service::AuthService;
