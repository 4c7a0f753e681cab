//! # adminhub-cache
//!
//! Cache provider implementations for AdminHub:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//!   with per-entry absolute/sliding expiry
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. Key
//! construction is centralized in [`keys`]; multi-key invalidation goes
//! through [`invalidation`] so no call site can partially invalidate a
//! user's cached footprint.

pub mod invalidation;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use invalidation::UserCacheInvalidator;
pub use provider::CacheManager;
