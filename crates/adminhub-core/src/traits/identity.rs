//! Identity store trait — the seam to the relational persistence layer.

use async_trait::async_trait;

use adminhub_entity::user::User;

use crate::result::AppResult;

/// Read access to stored identities.
///
/// Implementations return users with their roles eagerly loaded; the
/// authentication core never issues follow-up role queries.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Find an identity by exact username or email. The two match paths
    /// are mutually exclusive: an email-shaped identifier (see
    /// [`is_email_shaped`]) is matched against the email column only,
    /// anything else against the username column only.
    async fn find_by_username_or_email(&self, identifier: &str) -> AppResult<Option<User>>;

    /// Find an identity by its numeric id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Replace the stored password hash and advance the identity's
    /// `update_time`, which invalidates outstanding refresh eligibility.
    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()>;
}

/// Whether a login identifier should be treated as an email address.
pub fn is_email_shaped(identifier: &str) -> bool {
    match identifier.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
