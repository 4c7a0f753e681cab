//! Cache-backed session snapshot storage.

use std::sync::Arc;
use std::time::Duration;

use adminhub_cache::keys;
use adminhub_cache::provider::CacheManager;
use adminhub_cache::UserCacheInvalidator;
use adminhub_core::result::AppResult;
use adminhub_core::traits::cache::{CacheProvider, ExpirePolicy};
use adminhub_entity::session::OnlineUser;

/// Snapshot TTL: fixed at 2 hours regardless of token TTL. Cache entries
/// are a lookup aid, not the source of truth for authorization claims;
/// those live inside the signed token and the identity store.
const SNAPSHOT_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Stores session snapshots keyed by token fingerprint, with absolute
/// expiry: a materialization goes stale and requires re-derivation
/// rather than living forever from renewed access.
#[derive(Debug, Clone)]
pub struct SessionCache {
    cache: Arc<CacheManager>,
    invalidator: UserCacheInvalidator,
}

impl SessionCache {
    /// Creates a new session cache over the given provider.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        let invalidator = UserCacheInvalidator::new(Arc::clone(&cache));
        Self { cache, invalidator }
    }

    /// Writes a snapshot under the token fingerprint (2 h absolute TTL).
    pub async fn put(&self, token_fingerprint: &str, snapshot: &OnlineUser) -> AppResult<()> {
        self.cache
            .set_json(
                &keys::online_user(token_fingerprint),
                snapshot,
                SNAPSHOT_TTL,
                ExpirePolicy::Absolute,
            )
            .await
    }

    /// Reads the snapshot for a token fingerprint.
    pub async fn get(&self, token_fingerprint: &str) -> AppResult<Option<OnlineUser>> {
        self.cache
            .get_json(&keys::online_user(token_fingerprint))
            .await
    }

    /// Removes the snapshot for a token fingerprint.
    pub async fn remove(&self, token_fingerprint: &str) -> AppResult<()> {
        self.cache.remove(&keys::online_user(token_fingerprint)).await
    }

    /// Removes the snapshot plus every per-user facet key as one set.
    pub async fn invalidate_user(&self, user_id: i64, token_fingerprint: &str) -> AppResult<()> {
        self.invalidator.invalidate(user_id, token_fingerprint).await
    }
}
