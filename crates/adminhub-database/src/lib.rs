//! # adminhub-database
//!
//! PostgreSQL connection management and the concrete repository
//! implementations of the `adminhub-core` seam traits (identity store,
//! permission resolver, token blacklist store).

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
