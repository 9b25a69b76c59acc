//! Credit sales service
//!
//! A credit sale tracks what a customer still owes. The paid flag is always
//! derived from the amount owing, and a record can only be deleted once the
//! debt is cleared.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::is_fully_paid;

/// Credit sales service
#[derive(Clone)]
pub struct CreditService {
    db: PgPool,
}

/// Input for recording a credit sale
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCreditInput {
    #[validate(length(min = 1, max = 120))]
    pub customer_name: String,
    #[validate(length(max = 30))]
    pub customer_phone: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub bread_type: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub amount_owing: Decimal,
}

/// Input for updating a credit sale
#[derive(Debug, Deserialize)]
pub struct UpdateCreditInput {
    pub amount_owing: Option<Decimal>,
    pub customer_phone: Option<String>,
}

/// A credit sale as returned to the client
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CreditListing {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub bread_type: String,
    pub quantity: i32,
    pub amount_owing: Decimal,
    pub fully_paid: bool,
    pub seller_name: String,
    pub date_time: DateTime<Utc>,
}

impl CreditService {
    /// Create a new CreditService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a new credit sale for the current user
    pub async fn create(&self, seller_id: Uuid, input: CreateCreditInput) -> AppResult<Uuid> {
        input.validate().map_err(|e| AppError::Validation {
            field: "input".to_string(),
            message: e.to_string(),
        })?;
        if input.amount_owing < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "amount_owing".to_string(),
                message: "Amount owing cannot be negative".to_string(),
            });
        }

        let credit_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO credit_sales
                (customer_name, customer_phone, bread_type, quantity, amount_owing, fully_paid, seller_id, date_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(input.customer_name.trim())
        .bind(&input.customer_phone)
        .bind(input.bread_type.trim())
        .bind(input.quantity)
        .bind(input.amount_owing)
        .bind(is_fully_paid(input.amount_owing))
        .bind(seller_id)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(%seller_id, %credit_id, "Credit sale recorded");
        Ok(credit_id)
    }

    /// Update the amount owing and/or the customer's phone number
    ///
    /// The paid flag is recomputed from the new balance.
    pub async fn update(&self, credit_id: Uuid, input: UpdateCreditInput) -> AppResult<()> {
        let current = sqlx::query_scalar::<_, Decimal>(
            "SELECT amount_owing FROM credit_sales WHERE id = $1",
        )
        .bind(credit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Credit sale".to_string()))?;

        let amount_owing = input.amount_owing.unwrap_or(current);

        sqlx::query(
            r#"
            UPDATE credit_sales
            SET amount_owing = $1,
                fully_paid = $2,
                customer_phone = COALESCE($3, customer_phone)
            WHERE id = $4
            "#,
        )
        .bind(amount_owing)
        .bind(is_fully_paid(amount_owing))
        .bind(&input.customer_phone)
        .bind(credit_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// List the current user's credit sales, newest first
    pub async fn list_mine(&self, seller_id: Uuid) -> AppResult<Vec<CreditListing>> {
        let sales = sqlx::query_as::<_, CreditListing>(
            r#"
            SELECT c.id, c.customer_name, c.customer_phone, c.bread_type, c.quantity,
                   c.amount_owing, c.fully_paid, u.username AS seller_name, c.date_time
            FROM credit_sales c
            JOIN users u ON u.id = c.seller_id
            WHERE c.seller_id = $1
            ORDER BY c.date_time DESC
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// List every credit sale across sellers, newest first
    pub async fn list_all(&self) -> AppResult<Vec<CreditListing>> {
        let sales = sqlx::query_as::<_, CreditListing>(
            r#"
            SELECT c.id, c.customer_name, c.customer_phone, c.bread_type, c.quantity,
                   c.amount_owing, c.fully_paid, u.username AS seller_name, c.date_time
            FROM credit_sales c
            JOIN users u ON u.id = c.seller_id
            ORDER BY c.date_time DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Delete a credit sale; the debt must be cleared first
    pub async fn delete(&self, credit_id: Uuid) -> AppResult<()> {
        let fully_paid = sqlx::query_scalar::<_, bool>(
            "SELECT fully_paid FROM credit_sales WHERE id = $1",
        )
        .bind(credit_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Credit sale".to_string()))?;

        if !fully_paid {
            return Err(AppError::DebtNotCleared(
                "This credit sale has not been fully paid".to_string(),
            ));
        }

        sqlx::query("DELETE FROM credit_sales WHERE id = $1")
            .bind(credit_id)
            .execute(&self.db)
            .await?;

        tracing::info!(%credit_id, "Credit sale deleted");
        Ok(())
    }
}
