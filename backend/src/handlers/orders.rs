//! Order handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::orders::{OrderListing, SettleOrderInput, SettledOrder};
use crate::services::OrderService;
use crate::AppState;
use shared::types::Role;

#[derive(Deserialize)]
pub struct LocationQuery {
    pub location: String,
}

/// Settle an order against the seller's inventory (seller only)
pub async fn settle_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SettleOrderInput>,
) -> AppResult<(StatusCode, Json<SettledOrder>)> {
    current_user.0.require_role(Role::Seller)?;
    let service = OrderService::new(state.db, state.sheets);
    let settled = service
        .settle(
            current_user.0.user_id,
            current_user.0.location.as_deref(),
            body,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(settled)))
}

/// List orders for a location (admin only)
pub async fn list_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<Vec<OrderListing>>> {
    current_user.0.require_role(Role::Admin)?;
    let service = OrderService::new(state.db, state.sheets);
    let orders = service.list_by_location(&query.location).await?;
    Ok(Json(orders))
}

/// Distinct locations that have recorded orders (admin only)
pub async fn order_locations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<String>>> {
    current_user.0.require_role(Role::Admin)?;
    let service = OrderService::new(state.db, state.sheets);
    let locations = service.order_locations().await?;
    Ok(Json(locations))
}

/// Delete all sales records for a location (admin only)
pub async fn delete_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<LocationQuery>,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    if query.location.trim().is_empty() {
        return Err(AppError::Validation {
            field: "location".to_string(),
            message: "Location is required".to_string(),
        });
    }
    let service = OrderService::new(state.db, state.sheets);
    service.delete_by_location(&query.location).await?;
    Ok(StatusCode::NO_CONTENT)
}
