//! Messaging handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::messages::{MessageListing, SendMessageInput};
use crate::services::MessageService;
use crate::AppState;

#[derive(Serialize)]
pub struct SendMessageResponse {
    pub message_id: Uuid,
}

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// Send a message to another user
pub async fn send_message(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SendMessageInput>,
) -> AppResult<(StatusCode, Json<SendMessageResponse>)> {
    let service = MessageService::new(state.db);
    let message_id = service.send(current_user.0.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(SendMessageResponse { message_id })))
}

/// The conversation with another user, marking received messages read
pub async fn get_conversation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(other_id): Path<Uuid>,
) -> AppResult<Json<Vec<MessageListing>>> {
    let service = MessageService::new(state.db);
    let messages = service
        .conversation(current_user.0.user_id, other_id)
        .await?;
    Ok(Json(messages))
}

/// Unread message count for the current user
pub async fn unread_count(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UnreadCountResponse>> {
    let service = MessageService::new(state.db);
    let unread = service.unread_count(current_user.0.user_id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}
