//! Authentication orchestrator — login, refresh, info, and logout flows.
//!
//! One login episode moves through `Anonymous → Authenticated(access) →
//! Refreshable(until = login time + window) → Expired | Revoked`. All
//! operations are request-scoped; no lock is held across an await, and
//! concurrent logins for one identity are independent episodes with
//! independently keyed cache entries.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use adminhub_core::config::auth::AuthConfig;
use adminhub_core::error::AppError;
use adminhub_core::fingerprint::md5_16;
use adminhub_core::result::AppResult;
use adminhub_core::traits::identity::IdentityStore;
use adminhub_core::traits::permission::PermissionResolver;
use adminhub_entity::session::{AuthenticatedUser, OnlineUser, TokenPair};
use adminhub_entity::user::{User, UserProfile};

use crate::blacklist::TokenBlacklistService;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{CredentialVerifier, PasswordHasher, PasswordTransport};

use super::cache::SessionCache;
use super::principal::Principal;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// The authenticated user view.
    pub user: AuthenticatedUser,
    /// The issued token pair.
    pub token: TokenPair,
}

/// Composes the verifier, issuer, blacklist, and session cache into the
/// login / refresh / info / logout workflows.
#[derive(Clone)]
pub struct AuthManager {
    /// Credential verification.
    verifier: CredentialVerifier,
    /// Token issuing.
    encoder: Arc<JwtEncoder>,
    /// Token verification.
    decoder: Arc<JwtDecoder>,
    /// Revocation gate.
    blacklist: TokenBlacklistService,
    /// Session snapshot storage.
    session_cache: SessionCache,
    /// Identity lookup.
    identity_store: Arc<dyn IdentityStore>,
    /// Permission-role resolution.
    permission_resolver: Arc<dyn PermissionResolver>,
    /// Password transport (for password change).
    transport: Arc<PasswordTransport>,
    /// Password hashing (for password change).
    hasher: PasswordHasher,
    /// Refresh window in hours from the original login instant.
    refresh_window_hours: i64,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("refresh_window_hours", &self.refresh_window_hours)
            .finish()
    }
}

impl AuthManager {
    /// Creates a new orchestrator with all required dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        permission_resolver: Arc<dyn PermissionResolver>,
        blacklist: TokenBlacklistService,
        session_cache: SessionCache,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        transport: Arc<PasswordTransport>,
        config: &AuthConfig,
    ) -> Self {
        let hasher = PasswordHasher::new();
        let verifier = CredentialVerifier::new(
            Arc::clone(&identity_store),
            Arc::clone(&transport),
            hasher.clone(),
        );

        Self {
            verifier,
            encoder,
            decoder,
            blacklist,
            session_cache,
            identity_store,
            permission_resolver,
            transport,
            hasher,
            refresh_window_hours: config.refresh_window_hours as i64,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Verify credentials (lookup, transport decrypt, hash check,
    ///    enabled check)
    /// 2. Compute the effective permission-role set
    /// 3. Build the session snapshot
    /// 4. Mint the access+refresh pair with a fresh `iat`
    /// 5. Cache the snapshot keyed by the refresh token's fingerprint;
    ///    the refresh token is the long-lived credential persisted for
    ///    the cache window
    pub async fn login(
        &self,
        identifier: &str,
        password_ciphertext: &str,
        login_ip: Option<String>,
    ) -> AppResult<LoginResult> {
        let user = self.verifier.verify(identifier, password_ciphertext).await?;

        let permission_roles = self.effective_permission_roles(&user).await?;

        let mut snapshot = OnlineUser::from_user(&user, permission_roles.clone(), login_ip);

        let token = self.encoder.issue(user.id, false)?;
        let refresh_token = token
            .refresh_token
            .as_ref()
            .ok_or_else(|| AppError::internal("Login issue produced no refresh token"))?;

        snapshot.access_token = refresh_token.token.clone();
        let fingerprint = md5_16(&refresh_token.token);
        self.session_cache.put(&fingerprint, &snapshot).await?;

        info!(user_id = user.id, username = %user.username, "Login successful");

        Ok(LoginResult {
            user: AuthenticatedUser {
                user: UserProfile::from(&user),
                roles: permission_roles,
            },
            token,
        })
    }

    /// Exchanges a previous access or refresh token for a new access
    /// token.
    ///
    /// Order matters: the blacklist is consulted on the raw fingerprint
    /// before any decoding, since revocation is absolute. The refresh window
    /// and the identity's `update_time` are both measured against the
    /// presented token's original `iat`.
    pub async fn refresh(&self, token_str: &str) -> AppResult<TokenPair> {
        if token_str.is_empty() {
            return Err(AppError::token_missing(
                "Token is missing, please log in again",
            ));
        }

        let fingerprint = md5_16(token_str);
        if self.blacklist.is_blacklisted(&fingerprint).await? {
            return Err(AppError::revoked(
                "Token has been revoked, please log in again",
            ));
        }

        let claims = self.decoder.decode(token_str)?;
        let login_time = claims.issued_at();

        let window_end = login_time + Duration::hours(self.refresh_window_hours);
        if Utc::now() > window_end {
            return Err(AppError::refresh_window_exceeded(
                "Refresh window has elapsed, please log in again",
            ));
        }

        let user = self
            .identity_store
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))?;

        if !user.enabled {
            return Err(AppError::account_disabled("Account is disabled"));
        }

        if let Some(update_time) = user.update_time {
            if update_time > login_time {
                return Err(AppError::stale_session(
                    "Account was modified after login, please log in again",
                ));
            }
        }

        let token = self.encoder.issue(user.id, true)?;

        // Update the snapshot's token field in place; roles and menu are
        // not recomputed on refresh. Role changes take effect at the
        // next full login.
        let mut snapshot = match self.session_cache.get(&fingerprint).await? {
            Some(snapshot) => snapshot,
            None => OnlineUser::from_user(&user, Vec::new(), None),
        };
        snapshot.access_token = token.access_token.token.clone();
        self.session_cache.put(&fingerprint, &snapshot).await?;

        info!(user_id = user.id, "Token refreshed");

        Ok(token)
    }

    /// Returns the externally visible view of the principal's identity.
    ///
    /// Pure read: permission roles are re-derived from the store; no
    /// cache TTL is touched.
    pub async fn info(&self, principal: &Principal) -> AppResult<AuthenticatedUser> {
        let user = self
            .identity_store
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))?;

        let permission_roles = self.effective_permission_roles(&user).await?;

        Ok(AuthenticatedUser {
            user: UserProfile::from(&user),
            roles: permission_roles,
        })
    }

    /// Removes the cache-backed derived session.
    ///
    /// Idempotent: logging out without a principal succeeds as a no-op.
    /// The signed token itself stays cryptographically valid until its
    /// natural expiry; blacklist population for immediate revocation is
    /// an external concern.
    pub async fn logout(&self, principal: Option<&Principal>) -> AppResult<()> {
        let Some(principal) = principal else {
            return Ok(());
        };

        let fingerprint = md5_16(&principal.token);
        self.session_cache
            .invalidate_user(principal.user_id, &fingerprint)
            .await?;

        info!(user_id = principal.user_id, "Logout completed");
        Ok(())
    }

    /// Changes the principal's password and kills the login episode.
    ///
    /// The stored `update_time` advances, which invalidates outstanding
    /// refresh eligibility; the cached footprint is removed as one set.
    pub async fn change_password(
        &self,
        principal: &Principal,
        old_password_ciphertext: &str,
        new_password_ciphertext: &str,
    ) -> AppResult<()> {
        let user = self
            .identity_store
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User does not exist"))?;

        let old_password = self.transport.decrypt(old_password_ciphertext)?;
        let new_password = self.transport.decrypt(new_password_ciphertext)?;

        if old_password == new_password {
            return Err(AppError::validation(
                "New password must differ from the old password",
            ));
        }

        if !self
            .hasher
            .verify_password(&old_password, &user.password_hash)?
        {
            return Err(AppError::credential_mismatch("Old password is incorrect"));
        }

        let new_hash = self.hasher.hash_password(&new_password)?;
        self.identity_store.update_password(user.id, &new_hash).await?;

        let fingerprint = md5_16(&principal.token);
        self.session_cache
            .invalidate_user(user.id, &fingerprint)
            .await?;

        info!(user_id = user.id, "Password changed, session invalidated");
        Ok(())
    }

    /// Resolver-derived permissions merged with the roles' direct
    /// permission values, deduplicated.
    async fn effective_permission_roles(&self, user: &User) -> AppResult<Vec<String>> {
        let mut roles = self
            .permission_resolver
            .role_permissions_for(user.id)
            .await?;
        roles.extend(user.direct_role_permissions());
        roles.sort();
        roles.dedup();
        Ok(roles)
    }
}
