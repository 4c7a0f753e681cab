//! # adminhub-api
//!
//! HTTP API layer for AdminHub built on Axum.
//!
//! Provides the authentication endpoints (login, refresh, info, logout,
//! password change), health checks, the principal extractors, DTOs, and
//! the `AppError` → HTTP mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
