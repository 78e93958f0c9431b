//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin; production only the origins listed in
//! `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use wdc_shared::config::Environment;

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

/// Refresh token header accepted by the reissue endpoint
pub const REFRESH_TOKEN_HEADER: &str = "refresh-token";

pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
        .max_age(MAX_AGE);

    if !environment.is_production() {
        info!("Configuring permissive CORS for {}", environment);
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}
