//! Application state shared across all handlers.

use std::sync::Arc;

use adminhub_auth::jwt::JwtDecoder;
use adminhub_auth::session::AuthManager;
use adminhub_cache::provider::CacheManager;
use adminhub_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Authentication orchestrator.
    pub auth: Arc<AuthManager>,
    /// Token decoder for the principal extractors.
    pub decoder: Arc<JwtDecoder>,
}
