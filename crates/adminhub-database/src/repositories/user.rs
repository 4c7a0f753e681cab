//! User repository — the Postgres-backed identity store.

use async_trait::async_trait;
use sqlx::PgPool;

use adminhub_core::error::{AppError, ErrorKind};
use adminhub_core::result::AppResult;
use adminhub_core::traits::identity::{is_email_shaped, IdentityStore};
use adminhub_entity::user::{Role, User};

/// Repository for identity lookup and credential updates.
///
/// Every returned [`User`] has its roles eagerly loaded.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the roles assigned to a user.
    async fn load_roles(&self, user_id: i64) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT r.id, r.name, r.permission, r.level FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 \
             ORDER BY r.level ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user roles", e))
    }

    /// Attach roles to a user row fetched without them.
    async fn with_roles(&self, user: Option<User>) -> AppResult<Option<User>> {
        match user {
            Some(mut user) => {
                user.roles = self.load_roles(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_username_or_email(&self, identifier: &str) -> AppResult<Option<User>> {
        let query = if is_email_shaped(identifier) {
            "SELECT * FROM users WHERE email = $1"
        } else {
            "SELECT * FROM users WHERE username = $1"
        };

        let user = sqlx::query_as::<_, User>(query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by identifier", e)
            })?;

        self.with_roles(user).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by id", e)
            })?;

        self.with_roles(user).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, update_time = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update password", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }
}
