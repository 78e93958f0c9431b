//! Mapping from domain errors to HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use tracing::{error, warn};
use validator::ValidationErrors;

use wdc_core::errors::{AuthError, DomainError, TokenError};
use wdc_shared::errors::{error_codes, ErrorResponse};

fn respond(status: StatusCode, code: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Convert a domain error into an HTTP response
pub fn handle_domain_error(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Auth(AuthError::InvalidCredentials) => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_CREDENTIALS,
            "Invalid email or password",
        ),
        DomainError::Token(TokenError::TokenExpired) => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Token has expired",
        ),
        DomainError::Token(TokenError::TokenGenerationFailed)
        | DomainError::Auth(AuthError::PasswordHashingFailed) => internal(err),
        DomainError::Token(_) => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            "Invalid token",
        ),
        DomainError::Unauthorized => respond(
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            "Authentication required",
        ),
        DomainError::Validation { message } => {
            respond(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
        }
        DomainError::Internal { .. } => internal(err),
    }
}

/// Reissue failures
///
/// Every token problem, whether malformed, expired, wrong-typed or superseded,
/// is reported to the client as the same `INVALID_REFRESH_TOKEN`. The precise
/// reason only goes to the log.
pub fn handle_reissue_error(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Token(TokenError::TokenGenerationFailed) => internal(err),
        DomainError::Token(reason) => {
            warn!("Reissue rejected: {}", reason);
            invalid_refresh_token()
        }
        other => handle_domain_error(other),
    }
}

pub fn invalid_refresh_token() -> HttpResponse {
    respond(
        StatusCode::UNAUTHORIZED,
        error_codes::INVALID_REFRESH_TOKEN,
        "Invalid refresh token",
    )
}

pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request");
    for (field, _) in errors.field_errors() {
        response = response.add_detail(field.to_string(), "invalid");
    }
    HttpResponse::BadRequest().json(response)
}

/// Error handler for malformed JSON bodies
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message));
    actix_web::error::InternalError::from_response(err, response).into()
}

fn internal(err: &DomainError) -> HttpResponse {
    error!("Request failed: {}", err);
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_is_401() {
        let resp = handle_domain_error(&DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_failure_is_500() {
        let resp = handle_domain_error(&DomainError::internal("redis down"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_reissue_token_errors_collapse_to_401() {
        for reason in [
            TokenError::TokenRevoked,
            TokenError::TokenExpired,
            TokenError::InvalidSignature,
            TokenError::InvalidTokenFormat,
        ] {
            let resp = handle_reissue_error(&DomainError::Token(reason));
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_reissue_store_failure_is_500() {
        let resp = handle_reissue_error(&DomainError::internal("redis down"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
