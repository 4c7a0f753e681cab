//! Token blacklist repository — the durable revocation registry.

use async_trait::async_trait;
use sqlx::PgPool;

use adminhub_core::error::{AppError, ErrorKind};
use adminhub_core::result::AppResult;
use adminhub_core::traits::blacklist::BlacklistStore;
use adminhub_entity::session::TokenBlacklist;

/// Append-only store of revoked token fingerprints.
#[derive(Debug, Clone)]
pub struct TokenBlacklistRepository {
    pool: PgPool,
}

impl TokenBlacklistRepository {
    /// Create a new blacklist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlacklistStore for TokenBlacklistRepository {
    async fn contains(&self, fingerprint: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM token_blacklist WHERE access_token = $1)",
        )
        .bind(fingerprint)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check blacklist", e))
    }

    async fn insert(&self, entry: &TokenBlacklist) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO token_blacklist (access_token, reason, create_time) \
             VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(&entry.access_token)
        .bind(&entry.reason)
        .bind(entry.create_time)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert blacklist entry", e)
        })?;
        Ok(())
    }
}
