use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpServer;
use anyhow::Context;
use tracing::{info, warn};

use wdc_api::{app_state, create_app, telemetry, HttpSettings};
use wdc_core::repositories::RefreshTokenStore;
use wdc_core::services::{AuthService, TokenService, TokenServiceConfig, DEFAULT_PASSWORD_COST};
use wdc_infra::{InMemoryRefreshTokenStore, InMemoryUserRepository, RedisClient, RedisRefreshTokenStore};
use wdc_shared::config::{AppConfig, CacheConfig, TokenStoreKind};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);
    config.validate().context("Invalid configuration")?;

    info!("Starting WithDogAndCat API Server ({})", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }

    let token_service = Arc::new(
        TokenServiceConfig::from_jwt_config(&config.auth.jwt)
            .and_then(TokenService::new)
            .context("Invalid JWT configuration")?,
    );
    let token_store = build_token_store(&config.cache).await?;
    let user_repository = Arc::new(
        InMemoryUserRepository::from_seed(&config.auth.seed_users, DEFAULT_PASSWORD_COST)
            .context("Invalid SEED_USERS")?,
    );
    if user_repository.is_empty().await {
        warn!("No accounts loaded; set SEED_USERS to enable login");
    }

    let auth_service = Arc::new(AuthService::new(token_service, token_store, user_repository));
    let state = app_state(auth_service);
    let settings = HttpSettings {
        environment: config.environment,
        allowed_origins: config.server.allowed_origins.clone(),
    };

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &settings));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn build_token_store(config: &CacheConfig) -> anyhow::Result<Arc<dyn RefreshTokenStore>> {
    match config.store {
        TokenStoreKind::Redis => {
            let client = RedisClient::new(config)
                .await
                .context("Failed to connect to Redis")?;
            info!("Refresh tokens stored in Redis");
            Ok(Arc::new(RedisRefreshTokenStore::new(
                client,
                config.key_prefix.clone(),
            )))
        }
        TokenStoreKind::Memory => {
            let store = Arc::new(InMemoryRefreshTokenStore::new());
            store.spawn_sweeper(Duration::from_secs(config.sweep_interval.max(1)));
            info!("Refresh tokens stored in process memory");
            Ok(store)
        }
    }
}
