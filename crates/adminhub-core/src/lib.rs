//! # adminhub-core
//!
//! Core crate for AdminHub. Contains configuration schemas, the token
//! fingerprint helper, the seam traits consumed by the authentication
//! core (identity store, permission resolver, cache, blacklist store),
//! and the unified error system.
//!
//! Depends only on `adminhub-entity` for the types that appear in trait
//! signatures.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
