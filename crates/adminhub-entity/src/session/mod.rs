//! Session domain entities.

pub mod blacklist;
pub mod online;
pub mod token;

pub use blacklist::TokenBlacklist;
pub use online::{AuthenticatedUser, OnlineUser};
pub use token::{AccessToken, RefreshToken, TokenPair};
