//! Session lifecycle — cache-resident snapshots and the orchestrator.

pub mod cache;
pub mod manager;
pub mod principal;

pub use cache::SessionCache;
pub use manager::{AuthManager, LoginResult};
pub use principal::Principal;
