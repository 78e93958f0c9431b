use actix_web::{web, HttpRequest, HttpResponse};

use wdc_core::repositories::{RefreshTokenStore, UserRepository};

use crate::dto::auth_dto::{ReissueRequest, TokenResponse};
use crate::handlers::error::{handle_reissue_error, invalid_refresh_token};
use crate::middleware::cors::REFRESH_TOKEN_HEADER;

use super::AppState;

/// Handler for POST /api/v1/auth/reissue
///
/// Exchanges a refresh token for a new access and refresh pair. The token is
/// read from the JSON body, or from the `Refresh-Token` header when the body
/// carries none.
///
/// # Response
///
/// - 200 OK: [`TokenResponse`]; the presented refresh token is now spent
/// - 401 Unauthorized: `INVALID_REFRESH_TOKEN` for missing, malformed,
///   expired, wrong-typed or superseded tokens
/// - 500 Internal Server Error: token store unavailable
pub async fn reissue<S, U>(
    req: HttpRequest,
    state: web::Data<AppState<S, U>>,
    body: Option<web::Json<ReissueRequest>>,
) -> HttpResponse
where
    S: RefreshTokenStore + ?Sized + 'static,
    U: UserRepository + ?Sized + 'static,
{
    let token = body
        .and_then(|body| body.into_inner().refresh_token)
        .filter(|token| !token.trim().is_empty())
        .or_else(|| header_token(&req));

    let Some(token) = token else {
        return invalid_refresh_token();
    };

    match state.auth_service.reissue(token.trim()).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_reissue_error(&error),
    }
}

fn header_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(REFRESH_TOKEN_HEADER)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
