//! The authenticated principal of one request.

use serde::{Deserialize, Serialize};

/// The verified identity behind the current request.
///
/// Always threaded as an explicit parameter into orchestrator operations,
/// never held as ambient/global state; cache key derivation depends on
/// the exact token the caller presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Numeric user id from the verified token.
    pub user_id: i64,
    /// The raw token string the caller presented.
    pub token: String,
}

impl Principal {
    /// Creates a principal from verified claims and the raw token.
    pub fn new(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
        }
    }
}
