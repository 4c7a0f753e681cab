//! Cache key builders for all AdminHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the application uses. Session-derived keys are fingerprinted:
//! the session snapshot by the MD5-16 of the raw token, the per-user
//! facets by the MD5-16 of the decimal user id.

use adminhub_core::fingerprint::md5_16;

/// Prefix applied to all AdminHub cache keys.
const PREFIX: &str = "adminhub";

// ── Session keys ───────────────────────────────────────────

/// Cache key for the session snapshot of a login episode, keyed by the
/// token fingerprint.
pub fn online_user(token_fingerprint: &str) -> String {
    format!("{PREFIX}:auth:online:{token_fingerprint}")
}

// ── Per-user facet keys ────────────────────────────────────

/// Cache key for the permission-role identifiers of a user.
pub fn user_permission_roles(user_id: i64) -> String {
    format!("{PREFIX}:user:perm:roles:{}", md5_16(&user_id.to_string()))
}

/// Cache key for the rendered menu of a user.
pub fn user_menus(user_id: i64) -> String {
    format!("{PREFIX}:user:menus:{}", md5_16(&user_id.to_string()))
}

/// Cache key for the permission URLs of a user.
pub fn user_permission_urls(user_id: i64) -> String {
    format!("{PREFIX}:user:perm:urls:{}", md5_16(&user_id.to_string()))
}

/// Cache key for the data scope of a user.
pub fn user_data_scope(user_id: i64) -> String {
    format!("{PREFIX}:user:data:scope:{}", md5_16(&user_id.to_string()))
}

// ── Invalidation ───────────────────────────────────────────

/// Every cache key derived from one login episode of a user: the session
/// snapshot plus all four per-user facets.
///
/// Invalidation removes this whole set together; removing a subset (for
/// example the snapshot but not the permission facets) is a correctness
/// bug the invalidation-set abstraction exists to prevent.
pub fn invalidation_set(user_id: i64, token_fingerprint: &str) -> Vec<String> {
    vec![
        online_user(token_fingerprint),
        user_permission_roles(user_id),
        user_menus(user_id),
        user_permission_urls(user_id),
        user_data_scope(user_id),
    ]
}
