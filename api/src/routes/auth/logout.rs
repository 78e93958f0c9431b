use actix_web::{web, HttpResponse};

use wdc_core::repositories::{RefreshTokenStore, UserRepository};

use crate::dto::auth_dto::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Drops the caller's live refresh token. Requires `Authorization: Bearer`.
/// The access token itself stays valid until it expires.
pub async fn logout<S, U>(
    state: web::Data<AppState<S, U>>,
    auth: AuthContext,
) -> HttpResponse
where
    S: RefreshTokenStore + ?Sized + 'static,
    U: UserRepository + ?Sized + 'static,
{
    match state.auth_service.logout(&auth.subject).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
