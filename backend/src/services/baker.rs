//! Baker submission workflow
//!
//! Bakers submit their purchases and bread production as free-form blobs.
//! A baker may hold at most one pending submission at a time; the admin
//! approves or rejects it. Approval is idempotent and recomputes the two
//! derived cost totals from the stored blobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{total_purchase_cost, total_usage_cost};
use shared::types::SubmissionStatus;

/// Baker submission service
#[derive(Clone)]
pub struct BakerService {
    db: PgPool,
}

/// Input for a baker submission
#[derive(Debug, Deserialize)]
pub struct SubmitInput {
    pub purchases: Value,
    pub breads: Value,
}

/// A submission as listed for the admin, with derived totals
#[derive(Debug, Serialize)]
pub struct SubmissionListing {
    pub id: Uuid,
    pub baker_name: String,
    pub purchases: Value,
    pub breads: Value,
    pub status: SubmissionStatus,
    pub date_sent: DateTime<Utc>,
    pub total_purchase_cost: rust_decimal::Decimal,
    pub total_usage_cost: rust_decimal::Decimal,
}

/// Outcome of an approval
#[derive(Debug, Serialize)]
pub struct ApprovalOutcome {
    pub submission_id: Uuid,
    pub status: SubmissionStatus,
    pub total_purchase_cost: rust_decimal::Decimal,
    pub total_usage_cost: rust_decimal::Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    purchases: Value,
    breads: Value,
    status: String,
}

impl BakerService {
    /// Create a new BakerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a new submission for a baker
    ///
    /// Rejected while the baker still has a pending submission awaiting
    /// review.
    pub async fn submit(&self, baker_id: Uuid, input: SubmitInput) -> AppResult<Uuid> {
        let pending = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM baker_submissions WHERE seller_id = $1 AND status = 'pending'",
        )
        .bind(baker_id)
        .fetch_one(&self.db)
        .await?;
        if pending > 0 {
            return Err(AppError::Conflict {
                resource: "submission".to_string(),
                message: "You already have a submission awaiting review".to_string(),
            });
        }

        let submission_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO baker_submissions (seller_id, purchases, breads, status, date_sent)
            VALUES ($1, $2, $3, 'pending', $4)
            RETURNING id
            "#,
        )
        .bind(baker_id)
        .bind(&input.purchases)
        .bind(&input.breads)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(%baker_id, %submission_id, "Baker submission recorded");
        Ok(submission_id)
    }

    /// List all submissions, newest first, with the baker's name and the
    /// derived cost totals
    pub async fn list(&self) -> AppResult<Vec<SubmissionListing>> {
        #[derive(sqlx::FromRow)]
        struct ListRow {
            id: Uuid,
            baker_name: String,
            purchases: Value,
            breads: Value,
            status: String,
            date_sent: DateTime<Utc>,
        }

        let rows = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT b.id, u.username AS baker_name, b.purchases, b.breads,
                   b.status, b.date_sent
            FROM baker_submissions b
            JOIN users u ON u.id = b.seller_id
            ORDER BY b.date_sent DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SubmissionListing {
                id: row.id,
                baker_name: row.baker_name,
                total_purchase_cost: total_purchase_cost(&row.purchases),
                total_usage_cost: total_usage_cost(&row.breads),
                purchases: row.purchases,
                breads: row.breads,
                status: SubmissionStatus::parse(&row.status).unwrap_or_default(),
                date_sent: row.date_sent,
            })
            .collect())
    }

    /// Approve a submission
    ///
    /// Re-approving an already approved submission is a no-op that still
    /// returns the totals.
    pub async fn approve(&self, submission_id: Uuid) -> AppResult<ApprovalOutcome> {
        let row = self.fetch(submission_id).await?;

        if row.status != "approved" {
            sqlx::query("UPDATE baker_submissions SET status = 'approved' WHERE id = $1")
                .bind(submission_id)
                .execute(&self.db)
                .await?;
            tracing::info!(%submission_id, "Submission approved");
        }

        Ok(ApprovalOutcome {
            submission_id,
            status: SubmissionStatus::Approved,
            total_purchase_cost: total_purchase_cost(&row.purchases),
            total_usage_cost: total_usage_cost(&row.breads),
        })
    }

    /// Reject a submission, freeing the baker to submit again
    pub async fn reject(&self, submission_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE baker_submissions SET status = 'rejected' WHERE id = $1")
            .bind(submission_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Submission".to_string()));
        }

        tracing::info!(%submission_id, "Submission rejected");
        Ok(())
    }

    /// Delete every submission (admin reset)
    pub async fn clear_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM baker_submissions")
            .execute(&self.db)
            .await?;

        tracing::info!(deleted = result.rows_affected(), "Baker submissions cleared");
        Ok(result.rows_affected())
    }

    async fn fetch(&self, submission_id: Uuid) -> AppResult<SubmissionRow> {
        sqlx::query_as::<_, SubmissionRow>(
            "SELECT purchases, breads, status FROM baker_submissions WHERE id = $1",
        )
        .bind(submission_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission".to_string()))
    }
}
