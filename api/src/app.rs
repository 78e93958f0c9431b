//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`].

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use wdc_core::repositories::{RefreshTokenStore, UserRepository};
use wdc_core::services::auth::AuthService;
use wdc_shared::config::Environment;
use wdc_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::{
    auth::{AccessTokenVerifier, JwtAuth},
    cors::create_cors,
};
use crate::routes::auth::{login::login, logout::logout, me::me, reissue::reissue, AppState};

/// HTTP-level settings for [`create_app`]
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    pub environment: Environment,
    pub allowed_origins: Vec<String>,
}

/// Create and configure the application with all dependencies
pub fn create_app<S, U>(
    app_state: web::Data<AppState<S, U>>,
    settings: &HttpSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: RefreshTokenStore + ?Sized + 'static,
    U: UserRepository + ?Sized + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.auth_service.clone();
    let jwt_auth = JwtAuth::new(verifier);
    let cors = create_cors(settings.environment, &settings.allowed_origins);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .route("/login", web::post().to(login::<S, U>))
                .route("/reissue", web::post().to(reissue::<S, U>))
                .service(
                    web::resource("/logout")
                        .wrap(jwt_auth.clone())
                        .route(web::post().to(logout::<S, U>)),
                )
                .service(
                    web::resource("/me")
                        .wrap(jwt_auth)
                        .route(web::get().to(me)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "withdogandcat-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

/// Shorthand used by the binary and the tests
pub fn app_state<S, U>(auth_service: Arc<AuthService<S, U>>) -> web::Data<AppState<S, U>>
where
    S: RefreshTokenStore + ?Sized,
    U: UserRepository + ?Sized,
{
    web::Data::new(AppState::new(auth_service))
}
