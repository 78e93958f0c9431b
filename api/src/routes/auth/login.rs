use actix_web::{web, HttpResponse};
use validator::Validate;

use wdc_core::repositories::{RefreshTokenStore, UserRepository};

use crate::dto::auth_dto::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "mung@dogcat.kr", "password": "..." }
/// ```
///
/// # Response
///
/// - 200 OK: [`TokenResponse`]; any earlier refresh token of the account
///   stops working
/// - 400 Bad Request: malformed email or empty password
/// - 401 Unauthorized: `INVALID_CREDENTIALS`
pub async fn login<S, U>(
    state: web::Data<AppState<S, U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    S: RefreshTokenStore + ?Sized + 'static,
    U: UserRepository + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
