//! Credential verification — the first step of every login.

use std::sync::Arc;

use adminhub_core::error::AppError;
use adminhub_core::result::AppResult;
use adminhub_core::traits::identity::IdentityStore;
use adminhub_entity::user::User;

use super::hasher::PasswordHasher;
use super::transport::PasswordTransport;

/// Validates a login identifier and transported password against the
/// identity store.
///
/// Pure read path: no side effects beyond the store lookup. Each failure
/// mode is a distinct error kind so the orchestrator can surface a typed
/// message.
#[derive(Clone)]
pub struct CredentialVerifier {
    /// Identity lookup.
    identity_store: Arc<dyn IdentityStore>,
    /// Password transport decryption.
    transport: Arc<PasswordTransport>,
    /// Stored-hash verification.
    hasher: PasswordHasher,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish()
    }
}

impl CredentialVerifier {
    /// Creates a new verifier.
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        transport: Arc<PasswordTransport>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            identity_store,
            transport,
            hasher,
        }
    }

    /// Verifies the identifier/ciphertext pair and returns the matching
    /// identity.
    pub async fn verify(&self, identifier: &str, password_ciphertext: &str) -> AppResult<User> {
        let user = self
            .identity_store
            .find_by_username_or_email(identifier)
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))?;

        let password = self.transport.decrypt(password_ciphertext)?;

        if !self.hasher.verify_password(&password, &user.password_hash)? {
            return Err(AppError::credential_mismatch("Incorrect password"));
        }

        if !user.enabled {
            return Err(AppError::account_disabled("Account is disabled"));
        }

        Ok(user)
    }
}
