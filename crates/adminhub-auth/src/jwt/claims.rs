//! JWT claims structure shared by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims payload embedded in every issued token.
///
/// Access and refresh tokens carry the same claim set and differ only in
/// expiry; the refresh window is computed from `iat`, which a refresh
/// deliberately does not advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the numeric user id.
    pub jti: i64,
    /// Issued-at timestamp (seconds since epoch). For a refresh token
    /// this is the original login instant.
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token issuer.
    pub iss: String,
    /// Token audience.
    pub aud: String,
}

impl Claims {
    /// Returns the user id from the subject claim.
    pub fn user_id(&self) -> i64 {
        self.jti
    }

    /// Returns the issued-at instant as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_else(Utc::now)
    }
}
