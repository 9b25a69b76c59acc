//! Stock import handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::stock_sync::ImportSummary;
use crate::services::StockSyncService;
use crate::AppState;
use shared::types::Role;

#[derive(Deserialize)]
pub struct ImportRequest {
    pub location: String,
}

/// Import a location's spreadsheet tab into the ledger (admin only)
pub async fn import_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<ImportRequest>,
) -> AppResult<Json<ImportSummary>> {
    current_user.0.require_role(Role::Admin)?;
    let service = StockSyncService::new(state.db, state.sheets);
    let summary = service.import_location(&body.location).await?;
    Ok(Json(summary))
}
