//! Token verification.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use adminhub_core::config::auth::AuthConfig;
use adminhub_core::error::AppError;
use adminhub_core::result::AppResult;

use super::claims::Claims;

/// Verifies token signatures and expiry before any claim is trusted.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.security_key.as_bytes()),
            validation,
        }
    }

    /// Decodes and verifies a token string.
    ///
    /// An unverifiable token never yields a partially-trusted claim set:
    /// a bad signature or shape is `TokenInvalid`, a past expiry is
    /// `TokenExpired`.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::token_expired("Token has expired")
                    }
                    _ => AppError::token_invalid("Token verification failed"),
                }
            })?;

        Ok(token_data.claims)
    }
}
