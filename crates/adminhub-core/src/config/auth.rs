//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Token issuing configuration.
///
/// The access token is the short-lived per-request credential; the refresh
/// window bounds how long after the original login a refresh is honored.
/// Both tokens are signed with the same HMAC key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_security_key")]
    pub security_key: String,
    /// Token issuer claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Token audience claim.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh window in hours, measured from the original login instant.
    #[serde(default = "default_refresh_window")]
    pub refresh_window_hours: u64,
}

/// RSA key pair for password transport.
///
/// The client encrypts the password with the public key so it never
/// traverses the network in clear text; the server decrypts with the
/// private key. Defense in depth; not a substitute for TLS.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RsaConfig {
    /// PKCS#8 PEM-encoded private key.
    #[serde(default)]
    pub private_key: String,
    /// PKCS#8 PEM-encoded public key, served to clients.
    #[serde(default)]
    pub public_key: String,
}

fn default_security_key() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "adminhub".to_string()
}

fn default_audience() -> String {
    "adminhub-web".to_string()
}

fn default_access_ttl() -> u64 {
    120
}

fn default_refresh_window() -> u64 {
    96
}
