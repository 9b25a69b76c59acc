//! CSV export handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::export::{SalesExportFilter, StockHistoryExportFilter};
use crate::services::ExportService;
use crate::AppState;
use shared::types::Role;

/// Download sales data as CSV (admin only)
pub async fn export_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<SalesExportFilter>,
) -> AppResult<Response> {
    current_user.0.require_role(Role::Admin)?;
    let service = ExportService::new(state.db);
    let csv = service.sales_csv(filter).await?;
    Ok(csv_attachment("sales_data.csv", csv))
}

/// Download the stock adjustment audit trail as CSV (admin only)
pub async fn export_stock_history(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<StockHistoryExportFilter>,
) -> AppResult<Response> {
    current_user.0.require_role(Role::Admin)?;
    let service = ExportService::new(state.db);
    let csv = service.stock_history_csv(filter).await?;
    Ok(csv_attachment("stock_history.csv", csv))
}

fn csv_attachment(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
