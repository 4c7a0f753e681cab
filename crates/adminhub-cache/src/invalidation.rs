//! All-or-nothing invalidation of a user's cached footprint.

use std::sync::Arc;

use tracing::debug;

use adminhub_core::result::AppResult;
use adminhub_core::traits::cache::CacheProvider;

use crate::keys;
use crate::provider::CacheManager;

/// Removes every session-derived cache key for a user in one call.
///
/// Call sites never enumerate keys themselves: a partial invalidation
/// (session snapshot removed but a stale permission facet retained) would
/// be a correctness bug, so the key set lives in exactly one place.
#[derive(Debug, Clone)]
pub struct UserCacheInvalidator {
    cache: Arc<CacheManager>,
}

impl UserCacheInvalidator {
    /// Creates a new invalidator over the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Removes the session snapshot for the token fingerprint plus all
    /// four per-user facet keys.
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// error is returned afterwards so a transient cache fault cannot
    /// silently leave part of the set behind unreported.
    pub async fn invalidate(&self, user_id: i64, token_fingerprint: &str) -> AppResult<()> {
        let mut first_err = None;
        for key in keys::invalidation_set(user_id, token_fingerprint) {
            if let Err(e) = self.cache.remove(&key).await {
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => {
                debug!(user_id, token_fingerprint, "Invalidated user cache footprint");
                Ok(())
            }
        }
    }
}
