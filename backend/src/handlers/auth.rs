//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{
    ChangePasswordInput, LoginInput, LoginResponse, RegisterInput, RegisterResponse,
};
use crate::services::AuthService;
use crate::AppState;
use shared::types::Role;

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.login(body).await?;
    Ok(Json(response))
}

/// Register a new user (admin only)
pub async fn register(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    current_user.0.require_role(Role::Admin)?;
    let service = AuthService::new(state.db, &state.config);
    let response = service.register(body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Change an admin account's password (admin only)
pub async fn change_password(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<ChangePasswordInput>,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = AuthService::new(state.db, &state.config);
    service.change_admin_password(body).await?;
    Ok(StatusCode::NO_CONTENT)
}
