//! Product and inventory handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::products::{AdjustStockInput, InventoryLine, ProductListing, StockHistoryListing};
use crate::services::ProductService;
use crate::AppState;
use shared::types::Role;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// List products, optionally filtered by a search term
pub async fn list_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ProductListing>>> {
    let service = ProductService::new(state.db);
    let products = service.list(query.search.as_deref()).await?;
    Ok(Json(products))
}

/// List products for one location
pub async fn products_by_location(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(location): Path<String>,
) -> AppResult<Json<Vec<ProductListing>>> {
    let service = ProductService::new(state.db);
    let products = service.list_by_location(&location).await?;
    Ok(Json(products))
}

/// The current seller's inventory (seller only)
pub async fn my_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryLine>>> {
    current_user.0.require_role(Role::Seller)?;
    let service = ProductService::new(state.db);
    let inventory = service.seller_inventory(current_user.0.user_id).await?;
    Ok(Json(inventory))
}

/// Delete one product and everything that references it (admin only)
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Wipe the entire product catalog (admin only)
pub async fn delete_all_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = ProductService::new(state.db);
    service.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Manually adjust a seller's stock for a product (admin only)
pub async fn adjust_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<AdjustStockInput>,
) -> AppResult<StatusCode> {
    current_user.0.require_role(Role::Admin)?;
    let service = ProductService::new(state.db);
    service.adjust_stock(current_user.0.user_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stock adjustment audit trail (admin only)
pub async fn stock_history(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<StockHistoryListing>>> {
    current_user.0.require_role(Role::Admin)?;
    let service = ProductService::new(state.db);
    let entries = service.stock_history().await?;
    Ok(Json(entries))
}
