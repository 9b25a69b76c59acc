//! Credit sale handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::credit::{CreateCreditInput, CreditListing, UpdateCreditInput};
use crate::services::CreditService;
use crate::AppState;
use shared::types::Role;

#[derive(Serialize)]
pub struct CreateCreditResponse {
    pub credit_id: Uuid,
}

/// Record a new credit sale
pub async fn create_credit_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateCreditInput>,
) -> AppResult<(StatusCode, Json<CreateCreditResponse>)> {
    let service = CreditService::new(state.db);
    let credit_id = service.create(current_user.0.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(CreateCreditResponse { credit_id })))
}

/// List the current user's credit sales
pub async fn list_my_credit_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<CreditListing>>> {
    let service = CreditService::new(state.db);
    let sales = service.list_mine(current_user.0.user_id).await?;
    Ok(Json(sales))
}

/// List every credit sale across sellers (admin only)
pub async fn list_all_credit_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<CreditListing>>> {
    current_user.0.require_role(Role::Admin)?;
    let service = CreditService::new(state.db);
    let sales = service.list_all().await?;
    Ok(Json(sales))
}

/// Update the amount owing or the customer's phone number
pub async fn update_credit_sale(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(credit_id): Path<Uuid>,
    Json(body): Json<UpdateCreditInput>,
) -> AppResult<StatusCode> {
    let service = CreditService::new(state.db);
    service.update(credit_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a fully paid credit sale
pub async fn delete_credit_sale(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(credit_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CreditService::new(state.db);
    service.delete(credit_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
