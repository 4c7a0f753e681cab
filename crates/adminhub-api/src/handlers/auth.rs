//! Auth handlers — login, refresh, info, logout, password change.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use validator::Validate;

use adminhub_auth::session::LoginResult;
use adminhub_core::error::AppError;
use adminhub_entity::session::{AuthenticatedUser, TokenPair};

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{OptionalPrincipal, RequirePrincipal};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let login_ip = client_ip(&headers);
    let result = state.auth.login(&req.username, &req.password, login_ip).await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let token = state.auth.refresh(&req.token).await?;
    Ok(Json(ApiResponse::ok(token)))
}

/// GET /auth/info
pub async fn info(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<Json<ApiResponse<AuthenticatedUser>>, ApiError> {
    let user = state.auth.info(&principal).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    OptionalPrincipal(principal): OptionalPrincipal,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth.logout(principal.as_ref()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// PUT /auth/password
pub async fn change_password(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .auth
        .change_password(&principal, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed, please log in again".to_string(),
    })))
}

/// Best-effort client address from proxy headers.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
}
