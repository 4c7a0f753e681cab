//! Permission repository — resolves menu-granted permissions per user.

use async_trait::async_trait;
use sqlx::PgPool;

use adminhub_core::error::{AppError, ErrorKind};
use adminhub_core::result::AppResult;
use adminhub_core::traits::permission::PermissionResolver;

/// Resolves the permission identifiers a user holds through the menus
/// assigned to their roles.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionResolver for PermissionRepository {
    async fn role_permissions_for(&self, user_id: i64) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT m.permission FROM menus m \
             JOIN role_menus rm ON rm.menu_id = m.id \
             JOIN user_roles ur ON ur.role_id = rm.role_id \
             WHERE ur.user_id = $1 AND m.permission IS NOT NULL AND m.permission <> ''",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve permissions", e)
        })
    }
}
