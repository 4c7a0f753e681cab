//! Unified application error types for AdminHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The authentication failure taxonomy
//! is part of [`ErrorKind`] so that every branch of the login/refresh/logout
//! flows produces a typed, user-facing failure rather than an opaque fault.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource or identifier was not found.
    NotFound,
    /// The account exists but is administratively disabled.
    AccountDisabled,
    /// The supplied password did not match the stored hash.
    CredentialMismatch,
    /// The transported password ciphertext could not be decrypted.
    DecryptionFailure,
    /// No token was supplied where one is required.
    TokenMissing,
    /// The token signature or shape is invalid.
    TokenInvalid,
    /// The token is past its embedded expiry.
    TokenExpired,
    /// The refresh window since original login has elapsed.
    RefreshWindowExceeded,
    /// The identity was edited after the login this token belongs to.
    StaleSession,
    /// The token fingerprint is present in the revocation blacklist.
    Revoked,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification).
    Conflict,
    /// A database error occurred.
    Database,
    /// A cache error occurred.
    Cache,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::AccountDisabled => write!(f, "ACCOUNT_DISABLED"),
            Self::CredentialMismatch => write!(f, "CREDENTIAL_MISMATCH"),
            Self::DecryptionFailure => write!(f, "DECRYPTION_FAILURE"),
            Self::TokenMissing => write!(f, "TOKEN_MISSING"),
            Self::TokenInvalid => write!(f, "TOKEN_INVALID"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::RefreshWindowExceeded => write!(f, "REFRESH_WINDOW_EXCEEDED"),
            Self::StaleSession => write!(f, "STALE_SESSION"),
            Self::Revoked => write!(f, "REVOKED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Cache => write!(f, "CACHE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl ErrorKind {
    /// Whether this kind belongs to the authentication failure taxonomy
    /// (recovered at the API boundary into a user-facing message) as
    /// opposed to an infrastructure fault (surfaced as "try again").
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::AccountDisabled
                | Self::CredentialMismatch
                | Self::DecryptionFailure
                | Self::TokenMissing
                | Self::TokenInvalid
                | Self::TokenExpired
                | Self::RefreshWindowExceeded
                | Self::StaleSession
                | Self::Revoked
        )
    }
}

/// The unified application error used throughout AdminHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an account-disabled error.
    pub fn account_disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountDisabled, message)
    }

    /// Create a credential-mismatch error.
    pub fn credential_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialMismatch, message)
    }

    /// Create a decryption-failure error.
    pub fn decryption_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DecryptionFailure, message)
    }

    /// Create a token-missing error.
    pub fn token_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenMissing, message)
    }

    /// Create a token-invalid error.
    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenInvalid, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a refresh-window-exceeded error.
    pub fn refresh_window_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RefreshWindowExceeded, message)
    }

    /// Create a stale-session error.
    pub fn stale_session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StaleSession, message)
    }

    /// Create a revoked-token error.
    pub fn revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Revoked, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a cache error.
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cache, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_are_classified() {
        assert!(ErrorKind::Revoked.is_auth_failure());
        assert!(ErrorKind::RefreshWindowExceeded.is_auth_failure());
        assert!(!ErrorKind::Database.is_auth_failure());
        assert!(!ErrorKind::Internal.is_auth_failure());
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::revoked("token has been revoked");
        assert_eq!(err.to_string(), "REVOKED: token has been revoked");
    }
}
