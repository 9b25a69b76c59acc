//! Direct messaging between users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Messaging service
#[derive(Clone)]
pub struct MessageService {
    db: PgPool,
}

/// Input for sending a message
#[derive(Debug, Deserialize)]
pub struct SendMessageInput {
    pub receiver_id: Uuid,
    pub content: String,
}

/// A message as returned to the client
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MessageListing {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
}

impl MessageService {
    /// Create a new MessageService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Send a message from one user to another
    pub async fn send(&self, sender_id: Uuid, input: SendMessageInput) -> AppResult<Uuid> {
        let content = input.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation {
                field: "content".to_string(),
                message: "Message content is required".to_string(),
            });
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(input.receiver_id)
        .fetch_one(&self.db)
        .await?;
        if !exists {
            return Err(AppError::NotFound("Receiver".to_string()));
        }

        let message_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, content, is_read, timestamp)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING id
            "#,
        )
        .bind(sender_id)
        .bind(input.receiver_id)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(message_id)
    }

    /// The conversation between the current user and another user, oldest
    /// first; messages addressed to the current user are marked read
    pub async fn conversation(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> AppResult<Vec<MessageListing>> {
        sqlx::query(
            "UPDATE messages SET is_read = TRUE WHERE sender_id = $1 AND receiver_id = $2",
        )
        .bind(other_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        let messages = sqlx::query_as::<_, MessageListing>(
            r#"
            SELECT id, sender_id, receiver_id, content, is_read, timestamp
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY timestamp
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.db)
        .await?;

        Ok(messages)
    }

    /// How many unread messages the current user has
    pub async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }
}
