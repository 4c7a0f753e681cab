//! End-to-end tests for the authentication orchestrator, running against
//! the in-memory cache and in-memory implementations of the seam traits.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use adminhub_auth::blacklist::TokenBlacklistService;
use adminhub_auth::jwt::{Claims, JwtDecoder, JwtEncoder};
use adminhub_auth::password::PasswordHasher;
use adminhub_auth::password::PasswordTransport;
use adminhub_auth::session::{AuthManager, Principal, SessionCache};
use adminhub_cache::memory::MemoryCacheProvider;
use adminhub_cache::provider::CacheManager;
use adminhub_cache::keys;
use adminhub_core::config::auth::{AuthConfig, RsaConfig};
use adminhub_core::config::cache::MemoryCacheConfig;
use adminhub_core::error::ErrorKind;
use adminhub_core::fingerprint::md5_16;
use adminhub_core::result::AppResult;
use adminhub_core::traits::blacklist::BlacklistStore;
use adminhub_core::traits::cache::CacheProvider;
use adminhub_core::traits::identity::{is_email_shaped, IdentityStore};
use adminhub_core::traits::permission::PermissionResolver;
use adminhub_entity::session::TokenBlacklist;
use adminhub_entity::user::{Role, User};

#[derive(Debug, Default)]
struct MemoryIdentityStore {
    users: Mutex<HashMap<i64, User>>,
}

impl MemoryIdentityStore {
    fn add(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    fn set_update_time(&self, id: i64, at: DateTime<Utc>) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.update_time = Some(at);
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_username_or_email(&self, identifier: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        let user = if is_email_shaped(identifier) {
            users.values().find(|u| u.email.as_deref() == Some(identifier))
        } else {
            users.values().find(|u| u.username == identifier)
        };
        Ok(user.cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.get_mut(&id) {
            user.password_hash = password_hash.to_string();
            user.update_time = Some(Utc::now());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct StaticPermissionResolver {
    permissions: Mutex<HashMap<i64, Vec<String>>>,
}

impl StaticPermissionResolver {
    fn grant(&self, user_id: i64, permissions: &[&str]) {
        self.permissions
            .lock()
            .unwrap()
            .insert(user_id, permissions.iter().map(|s| s.to_string()).collect());
    }
}

#[async_trait]
impl PermissionResolver for StaticPermissionResolver {
    async fn role_permissions_for(&self, user_id: i64) -> AppResult<Vec<String>> {
        Ok(self
            .permissions
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Default)]
struct MemoryBlacklistStore {
    fingerprints: Mutex<HashSet<String>>,
}

#[async_trait]
impl BlacklistStore for MemoryBlacklistStore {
    async fn contains(&self, fingerprint: &str) -> AppResult<bool> {
        Ok(self.fingerprints.lock().unwrap().contains(fingerprint))
    }

    async fn insert(&self, entry: &TokenBlacklist) -> AppResult<()> {
        self.fingerprints
            .lock()
            .unwrap()
            .insert(entry.access_token.clone());
        Ok(())
    }
}

struct Harness {
    manager: AuthManager,
    cache: Arc<CacheManager>,
    identity_store: Arc<MemoryIdentityStore>,
    resolver: Arc<StaticPermissionResolver>,
    blacklist: TokenBlacklistService,
    config: AuthConfig,
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        security_key: "integration-test-signing-key".to_string(),
        issuer: "adminhub".to_string(),
        audience: "adminhub-web".to_string(),
        access_token_ttl_minutes: 30,
        refresh_window_hours: 4,
    }
}

fn harness() -> Harness {
    let config = auth_config();
    let cache = Arc::new(CacheManager::from_provider(Arc::new(
        MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1000 }),
    )));
    let identity_store = Arc::new(MemoryIdentityStore::default());
    let resolver = Arc::new(StaticPermissionResolver::default());
    let blacklist_store = Arc::new(MemoryBlacklistStore::default());
    let blacklist = TokenBlacklistService::new(blacklist_store);
    let transport = Arc::new(PasswordTransport::new(&RsaConfig::default()).unwrap());

    let manager = AuthManager::new(
        Arc::clone(&identity_store) as Arc<dyn IdentityStore>,
        Arc::clone(&resolver) as Arc<dyn PermissionResolver>,
        blacklist.clone(),
        SessionCache::new(Arc::clone(&cache)),
        Arc::new(JwtEncoder::new(&config)),
        Arc::new(JwtDecoder::new(&config)),
        transport,
        &config,
    );

    Harness {
        manager,
        cache,
        identity_store,
        resolver,
        blacklist,
        config,
    }
}

fn test_user(id: i64, username: &str, password: &str, enabled: bool) -> User {
    User {
        id,
        username: username.to_string(),
        email: Some(format!("{username}@example.com")),
        phone: None,
        password_hash: PasswordHasher::new().hash_password(password).unwrap(),
        enabled,
        create_time: Utc::now() - Duration::days(30),
        update_time: None,
        roles: vec![Role {
            id: 10,
            name: "operator".to_string(),
            permission: "operator".to_string(),
            level: 2,
        }],
    }
}

fn seed_alice(h: &Harness) {
    h.identity_store.add(test_user(1, "alice", "correct-horse", true));
    h.resolver.grant(1, &["user:list", "user:edit"]);
}

/// Forge a token with a chosen `iat` using the harness signing key.
fn forge_token(config: &AuthConfig, user_id: i64, iat: DateTime<Utc>, exp: DateTime<Utc>) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        jti: user_id,
        iat: iat.timestamp(),
        exp: exp.timestamp(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.security_key.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn login_returns_tokens_with_fresh_iat() {
    let h = harness();
    seed_alice(&h);

    let before = Utc::now().timestamp();
    let result = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let after = Utc::now().timestamp();

    let decoder = JwtDecoder::new(&h.config);
    let claims = decoder.decode(&result.token.access_token.token).unwrap();
    assert_eq!(claims.user_id(), 1);
    assert!(claims.iat >= before && claims.iat <= after);
    assert!(result.token.refresh_token.is_some());
}

#[tokio::test]
async fn login_snapshot_has_roles_and_matches_info() {
    let h = harness();
    seed_alice(&h);

    let result = h.manager.login("alice", "correct-horse", None).await.unwrap();
    assert_eq!(
        result.user.roles,
        vec!["operator".to_string(), "user:edit".to_string(), "user:list".to_string()]
    );

    let principal = Principal::new(1, result.token.access_token.token.clone());
    let info = h.manager.info(&principal).await.unwrap();
    assert_eq!(info.roles, result.user.roles);
    assert_eq!(info.user.username, "alice");
}

#[tokio::test]
async fn login_failures_are_typed() {
    let h = harness();
    seed_alice(&h);
    h.identity_store.add(test_user(2, "bob", "pw", false));

    let err = h.manager.login("nobody", "pw", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = h.manager.login("alice", "wrong", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::CredentialMismatch);

    let err = h.manager.login("bob", "pw", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccountDisabled);
}

#[tokio::test]
async fn login_caches_snapshot_under_refresh_fingerprint() {
    let h = harness();
    seed_alice(&h);

    let result = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh = result.token.refresh_token.unwrap();
    let fingerprint = md5_16(&refresh.token);

    let raw = h
        .cache
        .get(&keys::online_user(&fingerprint))
        .await
        .unwrap()
        .expect("snapshot must be cached");
    let snapshot: adminhub_entity::session::OnlineUser = serde_json::from_str(&raw).unwrap();

    assert_eq!(snapshot.user_id, 1);
    assert_eq!(snapshot.access_token, refresh.token);
    assert!(!snapshot.permission_roles.is_empty());
}

#[tokio::test]
async fn refresh_mints_access_only_and_updates_snapshot_token_field() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;
    let fingerprint = md5_16(&refresh_token);

    let refreshed = h.manager.refresh(&refresh_token).await.unwrap();
    assert!(refreshed.refresh_token.is_none());

    let raw = h
        .cache
        .get(&keys::online_user(&fingerprint))
        .await
        .unwrap()
        .unwrap();
    let snapshot: adminhub_entity::session::OnlineUser = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot.access_token, refreshed.access_token.token);
    // content was carried over, not recomputed
    assert!(!snapshot.permission_roles.is_empty());
}

#[tokio::test]
async fn refresh_does_not_recompute_roles() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;
    let fingerprint = md5_16(&refresh_token);

    // role change after login
    h.resolver.grant(1, &["user:list", "user:edit", "user:delete"]);

    h.manager.refresh(&refresh_token).await.unwrap();

    let raw = h
        .cache
        .get(&keys::online_user(&fingerprint))
        .await
        .unwrap()
        .unwrap();
    let snapshot: adminhub_entity::session::OnlineUser = serde_json::from_str(&raw).unwrap();
    assert!(!snapshot
        .permission_roles
        .contains(&"user:delete".to_string()));
}

#[tokio::test]
async fn refresh_with_empty_token_is_rejected() {
    let h = harness();
    let err = h.manager.refresh("").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenMissing);
}

#[tokio::test]
async fn blacklisted_token_fails_closed_before_decoding() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;

    h.blacklist
        .revoke(&md5_16(&refresh_token), "logout elsewhere")
        .await
        .unwrap();

    let err = h.manager.refresh(&refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Revoked);

    // revocation is absolute: even a string that is not a decodable
    // token is rejected on fingerprint alone
    h.blacklist
        .revoke(&md5_16("not-even-a-jwt"), "test")
        .await
        .unwrap();
    let err = h.manager.refresh("not-even-a-jwt").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Revoked);
}

#[tokio::test]
async fn refresh_window_exceeded_regardless_of_blacklist() {
    let h = harness();
    seed_alice(&h);

    // token issued 5h ago with a 4h window; still within its own expiry
    let token = forge_token(
        &h.config,
        1,
        Utc::now() - Duration::hours(5),
        Utc::now() + Duration::hours(1),
    );

    let err = h.manager.refresh(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RefreshWindowExceeded);
}

#[tokio::test]
async fn refresh_of_expired_token_is_token_expired() {
    let h = harness();
    seed_alice(&h);

    let token = forge_token(
        &h.config,
        1,
        Utc::now() - Duration::hours(2),
        Utc::now() - Duration::hours(1),
    );

    let err = h.manager.refresh(&token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenExpired);
}

#[tokio::test]
async fn identity_edit_after_login_staleness() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;

    // account edit lands after the login instant (iat has second
    // resolution, so push well past it)
    h.identity_store
        .set_update_time(1, Utc::now() + Duration::seconds(2));

    let err = h.manager.refresh(&refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::StaleSession);
}

#[tokio::test]
async fn logout_is_idempotent_and_clears_snapshot() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;
    let fingerprint = md5_16(&refresh_token);
    let principal = Principal::new(1, refresh_token);

    h.manager.logout(Some(&principal)).await.unwrap();
    assert!(h
        .cache
        .get(&keys::online_user(&fingerprint))
        .await
        .unwrap()
        .is_none());

    // second logout with the same principal still succeeds
    h.manager.logout(Some(&principal)).await.unwrap();

    // and no principal at all is a successful no-op
    h.manager.logout(None).await.unwrap();
}

#[tokio::test]
async fn logout_removes_every_facet_key() {
    use adminhub_core::traits::cache::ExpirePolicy;

    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;
    let fingerprint = md5_16(&refresh_token);

    // simulate the excluded collaborators having materialized facets
    for key in keys::invalidation_set(1, &fingerprint) {
        h.cache
            .set(&key, "{}", std::time::Duration::from_secs(600), ExpirePolicy::Absolute)
            .await
            .unwrap();
    }

    let principal = Principal::new(1, refresh_token);
    h.manager.logout(Some(&principal)).await.unwrap();

    for key in keys::invalidation_set(1, &fingerprint) {
        assert!(
            h.cache.get(&key).await.unwrap().is_none(),
            "key {key} must be invalidated"
        );
    }
}

#[tokio::test]
async fn change_password_kills_refresh_eligibility() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let refresh_token = login.token.refresh_token.unwrap().token;
    let fingerprint = md5_16(&refresh_token);
    let principal = Principal::new(1, refresh_token.clone());

    // iat resolution is one second; make sure the edit lands after it
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    h.manager
        .change_password(&principal, "correct-horse", "new-horse-battery")
        .await
        .unwrap();

    // snapshot gone
    assert!(h
        .cache
        .get(&keys::online_user(&fingerprint))
        .await
        .unwrap()
        .is_none());

    // outstanding refresh token no longer eligible
    let err = h.manager.refresh(&refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::StaleSession);

    // new credential works, old one does not
    let err = h.manager.login("alice", "correct-horse", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::CredentialMismatch);
    h.manager.login("alice", "new-horse-battery", None).await.unwrap();
}

#[tokio::test]
async fn change_password_rejects_wrong_old_and_same_new() {
    let h = harness();
    seed_alice(&h);

    let login = h.manager.login("alice", "correct-horse", None).await.unwrap();
    let principal = Principal::new(1, login.token.access_token.token.clone());

    let err = h
        .manager
        .change_password(&principal, "wrong", "new-horse-battery")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::CredentialMismatch);

    let err = h
        .manager
        .change_password(&principal, "correct-horse", "correct-horse")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn two_devices_hold_independent_episodes() {
    let h = harness();
    seed_alice(&h);

    let first = h.manager.login("alice", "correct-horse", None).await.unwrap();
    // claims have second resolution; two logins in the same second mint
    // byte-identical tokens and share one cache key (last-writer-wins)
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let second = h.manager.login("alice", "correct-horse", None).await.unwrap();

    let first_refresh = first.token.refresh_token.unwrap().token;
    let second_refresh = second.token.refresh_token.unwrap().token;
    assert_ne!(md5_16(&first_refresh), md5_16(&second_refresh));

    // logging out the first episode leaves the second's snapshot intact
    let principal = Principal::new(1, first_refresh);
    h.manager.logout(Some(&principal)).await.unwrap();

    let second_fp = md5_16(&second_refresh);
    assert!(h
        .cache
        .get(&keys::online_user(&second_fp))
        .await
        .unwrap()
        .is_some());
}
