//! Signed token creation with configurable TTLs.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use adminhub_core::config::auth::AuthConfig;
use adminhub_core::error::AppError;
use adminhub_core::result::AppResult;
use adminhub_entity::session::token::{AccessToken, RefreshToken, TokenPair};

use super::claims::Claims;

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token issuer claim.
    issuer: String,
    /// Token audience claim.
    audience: String,
    /// Access token TTL in seconds.
    access_ttl_seconds: i64,
    /// Refresh token TTL in seconds, which is also the refresh window.
    refresh_ttl_seconds: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.security_key.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_seconds: config.access_token_ttl_minutes as i64 * 60,
            refresh_ttl_seconds: config.refresh_window_hours as i64 * 3600,
        }
    }

    /// Issues token material for one login episode.
    ///
    /// Always mints a fresh access token with `iat` = now. On a fresh
    /// login (`refresh == false`) a refresh token with the longer expiry
    /// and the *same* `iat` is minted alongside it, so the refresh window
    /// stays anchored at the original login instant. On the refresh path
    /// (`refresh == true`) no new refresh token is minted; refresh
    /// tokens are single-epoch per login.
    pub fn issue(&self, user_id: i64, refresh: bool) -> AppResult<TokenPair> {
        let iat = Utc::now().timestamp();

        let access_claims = Claims {
            jti: user_id,
            iat,
            exp: iat + self.access_ttl_seconds,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let access_token = AccessToken {
            token: self.sign(&access_claims)?,
            expires_in: self.access_ttl_seconds as u64,
        };

        let refresh_token = if refresh {
            None
        } else {
            let refresh_claims = Claims {
                exp: iat + self.refresh_ttl_seconds,
                ..access_claims
            };
            Some(RefreshToken {
                token: self.sign(&refresh_claims)?,
                expires_in: self.refresh_ttl_seconds as u64,
            })
        };

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        })
    }

    fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
