//! AdminHub Server — administrative back-office API
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use adminhub_auth::blacklist::TokenBlacklistService;
use adminhub_auth::jwt::{JwtDecoder, JwtEncoder};
use adminhub_auth::password::PasswordTransport;
use adminhub_auth::session::{AuthManager, SessionCache};
use adminhub_core::config::AppConfig;
use adminhub_core::error::AppError;
use adminhub_core::traits::blacklist::BlacklistStore;
use adminhub_core::traits::identity::IdentityStore;
use adminhub_core::traits::permission::PermissionResolver;
use adminhub_database::repositories::{
    PermissionRepository, TokenBlacklistRepository, UserRepository,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("ADMINHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AdminHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = adminhub_database::DatabasePool::connect(&config.database).await?;
    adminhub_database::migration::run_migrations(db.pool()).await?;

    // ── Cache ────────────────────────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(adminhub_cache::provider::CacheManager::new(&config.cache).await?);

    // ── Repositories ─────────────────────────────────────────────
    let identity_store: Arc<dyn IdentityStore> =
        Arc::new(UserRepository::new(db.pool().clone()));
    let permission_resolver: Arc<dyn PermissionResolver> =
        Arc::new(PermissionRepository::new(db.pool().clone()));
    let blacklist_store: Arc<dyn BlacklistStore> =
        Arc::new(TokenBlacklistRepository::new(db.pool().clone()));

    // ── Authentication core ──────────────────────────────────────
    let transport = Arc::new(PasswordTransport::new(&config.rsa)?);
    let encoder = Arc::new(JwtEncoder::new(&config.auth));
    let decoder = Arc::new(JwtDecoder::new(&config.auth));
    let blacklist = TokenBlacklistService::new(blacklist_store);
    let session_cache = SessionCache::new(Arc::clone(&cache));

    let auth = Arc::new(AuthManager::new(
        identity_store,
        permission_resolver,
        blacklist,
        session_cache,
        encoder,
        Arc::clone(&decoder),
        transport,
        &config.auth,
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = adminhub_api::state::AppState {
        config: Arc::new(config),
        cache,
        auth,
        decoder,
    };
    let app = adminhub_api::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AdminHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("AdminHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
