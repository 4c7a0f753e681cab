//! # adminhub-auth
//!
//! The session and token lifecycle core of AdminHub.
//!
//! ## Modules
//!
//! - `jwt` — signed access/refresh token issuing and verification
//! - `password` — RSA password transport, Argon2id hashing, credential verification
//! - `blacklist` — durable token revocation registry
//! - `session` — cache-resident session snapshots and the authentication
//!   orchestrator (login, refresh, info, logout)

pub mod blacklist;
pub mod jwt;
pub mod password;
pub mod session;

pub use blacklist::TokenBlacklistService;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{CredentialVerifier, PasswordHasher, PasswordTransport};
pub use session::{AuthManager, LoginResult, Principal, SessionCache};
