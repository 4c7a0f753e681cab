//! Durable token blacklist store trait.

use async_trait::async_trait;

use adminhub_entity::session::TokenBlacklist;

use crate::result::AppResult;

/// Append-only check/insert store for revoked token fingerprints.
///
/// Presence of a fingerprint means "this specific token must never be
/// honored for refresh again".
#[async_trait]
pub trait BlacklistStore: Send + Sync + 'static {
    /// Whether the fingerprint is present in the blacklist.
    async fn contains(&self, fingerprint: &str) -> AppResult<bool>;

    /// Insert a revocation record. Inserting an already-present
    /// fingerprint is not an error.
    async fn insert(&self, entry: &TokenBlacklist) -> AppResult<()>;
}
