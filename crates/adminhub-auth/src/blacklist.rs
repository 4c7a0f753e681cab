//! Token revocation service over the durable blacklist store.

use std::sync::Arc;

use tracing::info;

use adminhub_core::result::AppResult;
use adminhub_core::traits::blacklist::BlacklistStore;
use adminhub_entity::session::TokenBlacklist;

/// Revocation gate consulted synchronously before any refresh is honored.
///
/// Entries are keyed by the MD5-16 fingerprint of the raw token text.
/// Presence is absolute: a blacklisted token is never decoded further.
#[derive(Clone)]
pub struct TokenBlacklistService {
    store: Arc<dyn BlacklistStore>,
}

impl std::fmt::Debug for TokenBlacklistService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBlacklistService").finish()
    }
}

impl TokenBlacklistService {
    /// Creates a new blacklist service.
    pub fn new(store: Arc<dyn BlacklistStore>) -> Self {
        Self { store }
    }

    /// Whether the fingerprint has been revoked.
    pub async fn is_blacklisted(&self, fingerprint: &str) -> AppResult<bool> {
        self.store.contains(fingerprint).await
    }

    /// Records a revocation for the fingerprint.
    pub async fn revoke(&self, fingerprint: &str, reason: &str) -> AppResult<()> {
        self.store
            .insert(&TokenBlacklist::new(fingerprint, reason))
            .await?;
        info!(fingerprint, reason, "Token fingerprint blacklisted");
        Ok(())
    }
}
