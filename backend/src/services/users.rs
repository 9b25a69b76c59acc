//! User administration service

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// User administration service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// A user as listed for the admin
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UserListing {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub location: Option<String>,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<UserListing>> {
        let users = sqlx::query_as::<_, UserListing>(
            "SELECT id, username, role, location FROM users ORDER BY username",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// Delete a user together with the records hanging off their account
    ///
    /// Baker submissions, orders, credit sales, inventory rows, messages and
    /// stock history entries referencing the user go with it.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Err(AppError::NotFound("User".to_string()));
        }

        sqlx::query("DELETE FROM baker_submissions WHERE seller_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM orders WHERE seller_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM credit_sales WHERE seller_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM inventories WHERE seller_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM messages WHERE sender_id = $1 OR receiver_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM stock_history WHERE admin_id = $1 OR seller_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%user_id, "User and related records deleted");
        Ok(())
    }
}
