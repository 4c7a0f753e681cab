//! Password handling — transport decryption, hashing, and verification.

pub mod hasher;
pub mod transport;
pub mod verifier;

pub use hasher::PasswordHasher;
pub use transport::PasswordTransport;
pub use verifier::CredentialVerifier;
