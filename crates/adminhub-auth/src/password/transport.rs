//! RSA password transport decryption.
//!
//! Clients encrypt the password with the published public key so it never
//! traverses the network in clear text; this module decrypts it with the
//! paired private key. Defense in depth; not a substitute for TLS.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};
use tracing::warn;

use adminhub_core::config::auth::RsaConfig;
use adminhub_core::error::AppError;
use adminhub_core::result::AppResult;

/// Decrypts password ciphertexts produced by the client against the
/// published public key.
#[derive(Clone)]
pub struct PasswordTransport {
    /// Private key half of the transport key pair. When no key is
    /// configured the transport is a pass-through (development only).
    private_key: Option<RsaPrivateKey>,
}

impl std::fmt::Debug for PasswordTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordTransport")
            .field("configured", &self.private_key.is_some())
            .finish()
    }
}

impl PasswordTransport {
    /// Creates a transport from configuration.
    pub fn new(config: &RsaConfig) -> AppResult<Self> {
        if config.private_key.trim().is_empty() {
            warn!("No RSA private key configured; password transport is pass-through");
            return Ok(Self { private_key: None });
        }

        let private_key = RsaPrivateKey::from_pkcs8_pem(&config.private_key)
            .map_err(|e| AppError::configuration(format!("Invalid RSA private key: {e}")))?;

        Ok(Self {
            private_key: Some(private_key),
        })
    }

    /// Creates a transport directly from a private key.
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        Self {
            private_key: Some(private_key),
        }
    }

    /// Decrypts a base64 ciphertext into the plaintext password.
    ///
    /// Any malformation (bad base64, wrong key, non-UTF-8 plaintext)
    /// is a `DecryptionFailure`; the cause is not distinguished to the
    /// caller.
    pub fn decrypt(&self, ciphertext: &str) -> AppResult<String> {
        let Some(private_key) = &self.private_key else {
            return Ok(ciphertext.to_string());
        };

        let bytes = BASE64
            .decode(ciphertext)
            .map_err(|_| AppError::decryption_failure("Malformed password ciphertext"))?;

        let plaintext = private_key
            .decrypt(Pkcs1v15Encrypt, &bytes)
            .map_err(|_| AppError::decryption_failure("Malformed password ciphertext"))?;

        String::from_utf8(plaintext)
            .map_err(|_| AppError::decryption_failure("Malformed password ciphertext"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminhub_core::error::ErrorKind;
    use rsa::RsaPublicKey;

    fn keypair() -> (RsaPrivateKey, RsaPublicKey) {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
        let public_key = RsaPublicKey::from(&private_key);
        (private_key, public_key)
    }

    fn encrypt(public_key: &RsaPublicKey, password: &str) -> String {
        let bytes = public_key
            .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, password.as_bytes())
            .unwrap();
        BASE64.encode(bytes)
    }

    #[test]
    fn decrypts_client_ciphertext() {
        let (private_key, public_key) = keypair();
        let transport = PasswordTransport::from_private_key(private_key);

        let ciphertext = encrypt(&public_key, "s3cret-pa55word");
        assert_eq!(transport.decrypt(&ciphertext).unwrap(), "s3cret-pa55word");
    }

    #[test]
    fn bad_base64_is_decryption_failure() {
        let (private_key, _) = keypair();
        let transport = PasswordTransport::from_private_key(private_key);

        let err = transport.decrypt("@@not-base64@@").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DecryptionFailure);
    }

    #[test]
    fn wrong_key_material_is_decryption_failure() {
        let (private_key, _) = keypair();
        let transport = PasswordTransport::from_private_key(private_key);

        let err = transport.decrypt(&BASE64.encode(b"random junk bytes")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DecryptionFailure);
    }

    #[test]
    fn unconfigured_transport_passes_through() {
        let transport = PasswordTransport::new(&RsaConfig::default()).unwrap();
        assert_eq!(transport.decrypt("plain").unwrap(), "plain");
    }
}
