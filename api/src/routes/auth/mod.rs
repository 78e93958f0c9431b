//! Authentication route handlers
//!
//! - Login with email and password
//! - Refresh token reissue
//! - Logout
//! - Current caller lookup

pub mod login;
pub mod logout;
pub mod me;
pub mod reissue;

use std::sync::Arc;

use wdc_core::repositories::{RefreshTokenStore, UserRepository};
use wdc_core::services::auth::AuthService;

/// Application state shared by the auth handlers
pub struct AppState<S, U>
where
    S: RefreshTokenStore + ?Sized,
    U: UserRepository + ?Sized,
{
    pub auth_service: Arc<AuthService<S, U>>,
}

impl<S, U> AppState<S, U>
where
    S: RefreshTokenStore + ?Sized,
    U: UserRepository + ?Sized,
{
    pub fn new(auth_service: Arc<AuthService<S, U>>) -> Self {
        Self { auth_service }
    }
}
