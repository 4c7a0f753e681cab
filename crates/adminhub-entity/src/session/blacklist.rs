//! Durable token revocation record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A revoked token, keyed by its MD5-16 fingerprint.
///
/// Presence means the token must never be honored for refresh again,
/// regardless of its embedded claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBlacklist {
    /// MD5-16 fingerprint of the raw token text.
    pub access_token: String,
    /// Why the token was revoked.
    pub reason: String,
    /// When the revocation was recorded.
    pub create_time: DateTime<Utc>,
}

impl TokenBlacklist {
    /// Creates a revocation record for the given fingerprint.
    pub fn new(fingerprint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            access_token: fingerprint.into(),
            reason: reason.into(),
            create_time: Utc::now(),
        }
    }
}
