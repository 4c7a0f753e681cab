//! Token value types for issued JWT credentials.

use serde::{Deserialize, Serialize};

/// An issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The raw JWT string.
    pub token: String,
    /// TTL in seconds.
    pub expires_in: u64,
}

/// An issued refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    /// The raw JWT string.
    pub token: String,
    /// TTL in seconds.
    pub expires_in: u64,
}

/// The token material returned by the issuer.
///
/// A fresh login carries both halves; the refresh path mints a new access
/// token only, so the refresh half is absent there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// The access token.
    pub access_token: AccessToken,
    /// The refresh token (present only on fresh login).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
    /// Token scheme for the Authorization header.
    pub token_type: String,
}
