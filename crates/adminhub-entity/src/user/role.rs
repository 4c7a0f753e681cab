//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A role assigned to one or more users.
///
/// `permission` is the role's direct permission value (merged into the
/// effective permission set alongside the resolver-derived permissions);
/// `level` is the numeric privilege used for ceiling checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique numeric identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Direct permission value (may be empty).
    pub permission: String,
    /// Privilege level; higher outranks lower.
    pub level: i32,
}
