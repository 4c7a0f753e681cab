//! Cache-resident session snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::{User, UserProfile};

/// Denormalized snapshot of a logged-in user, materialized in the cache at
/// login and keyed by the token fingerprint.
///
/// Exclusively owned by the cache: created on login/refresh, overwritten
/// on the next login/refresh, deleted on logout or password change. No
/// other durable copy exists; authorization claims live inside the
/// signed token and the backing identity store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUser {
    /// Numeric id of the user this snapshot belongs to.
    pub user_id: i64,
    /// Login name.
    pub username: String,
    /// Remote address observed at login.
    pub login_ip: Option<String>,
    /// The instant this login episode started.
    pub login_time: DateTime<Utc>,
    /// Effective permission identifiers (resolver permissions plus the
    /// roles' direct permission values). Empty on refresh-path rebuilds;
    /// recomputed only on fresh login.
    pub permission_roles: Vec<String>,
    /// The token most recently issued for this login episode.
    pub access_token: String,
}

impl OnlineUser {
    /// Builds a snapshot from an identity. The token field is filled in
    /// once the token pair has been minted.
    pub fn from_user(user: &User, permission_roles: Vec<String>, login_ip: Option<String>) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            login_ip,
            login_time: Utc::now(),
            permission_roles,
            access_token: String::new(),
        }
    }
}

/// The externally visible view of an authenticated user, returned by
/// login and info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The user's profile.
    pub user: UserProfile,
    /// Effective permission identifiers.
    pub roles: Vec<String>,
}
