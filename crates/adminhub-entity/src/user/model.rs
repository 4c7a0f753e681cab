//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::Role;

/// A registered identity in the AdminHub system.
///
/// The id is numeric and immutable. `update_time` advances on any account
/// edit and gates refresh eligibility: a token issued before the last edit
/// is no longer refreshable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique numeric identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may authenticate.
    pub enabled: bool,
    /// When the user was created.
    pub create_time: DateTime<Utc>,
    /// When the user was last updated (None if never edited).
    pub update_time: Option<DateTime<Utc>>,
    /// Assigned roles, eagerly loaded.
    #[sqlx(skip)]
    pub roles: Vec<Role>,
}

impl User {
    /// The highest privilege level among the user's roles (0 if none).
    ///
    /// Used for privilege ceiling checks: an operator may only manage
    /// accounts whose level is strictly below their own.
    pub fn max_role_level(&self) -> i32 {
        self.roles.iter().map(|r| r.level).max().unwrap_or(0)
    }

    /// The direct permission values carried on the user's roles.
    pub fn direct_role_permissions(&self) -> Vec<String> {
        self.roles
            .iter()
            .filter(|r| !r.permission.is_empty())
            .map(|r| r.permission.clone())
            .collect()
    }
}

/// The externally visible projection of a [`User`]: everything except
/// the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique numeric identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Whether the account may authenticate.
    pub enabled: bool,
    /// When the user was created.
    pub create_time: DateTime<Utc>,
    /// When the user was last updated.
    pub update_time: Option<DateTime<Utc>>,
    /// Names of the assigned roles.
    pub roles: Vec<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            enabled: user.enabled,
            create_time: user.create_time,
            update_time: user.update_time,
            roles: user.roles.iter().map(|r| r.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_levels(levels: &[i32]) -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: None,
            phone: None,
            password_hash: "hash".to_string(),
            enabled: true,
            create_time: Utc::now(),
            update_time: None,
            roles: levels
                .iter()
                .enumerate()
                .map(|(i, level)| Role {
                    id: i as i64 + 1,
                    name: format!("role-{i}"),
                    permission: String::new(),
                    level: *level,
                })
                .collect(),
        }
    }

    #[test]
    fn max_role_level_picks_highest() {
        assert_eq!(user_with_levels(&[1, 3, 2]).max_role_level(), 3);
        assert_eq!(user_with_levels(&[]).max_role_level(), 0);
    }

    #[test]
    fn direct_permissions_skip_empty() {
        let mut user = user_with_levels(&[1, 2]);
        user.roles[0].permission = "admin".to_string();
        assert_eq!(user.direct_role_permissions(), vec!["admin".to_string()]);
    }

    #[test]
    fn profile_never_serializes_hash() {
        let user = user_with_levels(&[1]);
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
