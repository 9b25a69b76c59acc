//! Reporting handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reports::{FinancialSummary, LocationReport};
use crate::services::ReportService;
use crate::AppState;
use shared::types::Role;

/// Sales report for one location (admin only)
pub async fn location_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(location): Path<String>,
) -> AppResult<Json<LocationReport>> {
    current_user.0.require_role(Role::Admin)?;
    let service = ReportService::new(state.db);
    let report = service.location_report(&location).await?;
    Ok(Json(report))
}

/// Global financial summary (admin only)
pub async fn financial_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<FinancialSummary>> {
    current_user.0.require_role(Role::Admin)?;
    let service = ReportService::new(state.db);
    let summary = service.financial_summary().await?;
    Ok(Json(summary))
}
