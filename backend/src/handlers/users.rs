//! User administration handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::users::UserListing;
use crate::services::UserService;
use crate::AppState;
use shared::types::Role;

/// List all users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<UserListing>>> {
    current_user.0.require_role(Role::Admin)?;
    let service = UserService::new(state.db);
    let users = service.list().await?;
    Ok(Json(users))
}

/// Delete a user and their records (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = UserService::new(state.db);
    service.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
