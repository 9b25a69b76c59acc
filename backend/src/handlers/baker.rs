//! Baker submission handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::baker::{ApprovalOutcome, SubmissionListing, SubmitInput};
use crate::services::BakerService;
use crate::AppState;
use shared::types::Role;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
}

/// Submit purchases and bread production for review (baker only)
pub async fn submit_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SubmitInput>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    current_user.0.require_role(Role::Baker)?;
    let service = BakerService::new(state.db);
    let submission_id = service.submit(current_user.0.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(SubmitResponse { submission_id })))
}

/// List all submissions with derived totals (admin only)
pub async fn list_submissions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<SubmissionListing>>> {
    current_user.0.require_role(Role::Admin)?;
    let service = BakerService::new(state.db);
    let submissions = service.list().await?;
    Ok(Json(submissions))
}

/// Approve a submission (admin only)
pub async fn approve_submission(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(submission_id): Path<Uuid>,
) -> AppResult<Json<ApprovalOutcome>> {
    current_user.0.require_role(Role::Admin)?;
    let service = BakerService::new(state.db);
    let outcome = service.approve(submission_id).await?;
    Ok(Json(outcome))
}

/// Reject a submission (admin only)
pub async fn reject_submission(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(submission_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = BakerService::new(state.db);
    service.reject(submission_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every submission (admin only)
pub async fn clear_submissions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = BakerService::new(state.db);
    service.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
