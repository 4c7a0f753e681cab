//! Permission resolver trait — the seam to the menu/permission subsystem.

use async_trait::async_trait;

use crate::result::AppResult;

/// Resolves the permission identifiers granted to a user through their
/// roles' menu assignments. The direct per-role permission values carried
/// on the roles themselves are merged in by the caller.
#[async_trait]
pub trait PermissionResolver: Send + Sync + 'static {
    /// Permission identifiers for the given user id.
    async fn role_permissions_for(&self, user_id: i64) -> AppResult<Vec<String>>;
}
