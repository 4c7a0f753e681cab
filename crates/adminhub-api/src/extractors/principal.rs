//! Principal extractors — pull the bearer token from the Authorization
//! header, verify it, and inject an explicit [`Principal`] value.
//!
//! The principal is always threaded as a parameter into orchestrator
//! operations, never held as ambient state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use adminhub_auth::session::Principal;
use adminhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated principal. Rejects the request when the
/// bearer token is missing or unverifiable.
#[derive(Debug, Clone)]
pub struct RequirePrincipal(pub Principal);

/// Like [`RequirePrincipal`], but resolves to `None` instead of
/// rejecting, for operations that are a no-op without a principal
/// (logout).
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(pub Option<Principal>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn verify(state: &AppState, token: &str) -> Result<Principal, AppError> {
    let claims = state.decoder.decode(token)?;
    Ok(Principal::new(claims.user_id(), token))
}

impl FromRequestParts<AppState> for RequirePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::token_missing("Missing Authorization header"))?;

        Ok(Self(verify(state, token)?))
    }
}

impl FromRequestParts<AppState> for OptionalPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = bearer_token(parts).and_then(|token| verify(state, token).ok());
        Ok(Self(principal))
    }
}
