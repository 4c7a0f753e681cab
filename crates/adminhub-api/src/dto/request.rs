//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body. The password field carries the RSA ciphertext
/// produced by the client against the published public key.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Encrypted password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body. Accepts the previous access or refresh
/// token string.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RefreshRequest {
    /// The token to exchange.
    #[serde(default)]
    pub token: String,
}

/// Password change request. Both fields are transport ciphertexts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password (encrypted).
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    /// New password (encrypted).
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}
