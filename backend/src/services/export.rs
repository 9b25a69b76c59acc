//! CSV export service for sales data and the stock adjustment audit trail

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// CSV export service
#[derive(Clone)]
pub struct ExportService {
    db: PgPool,
}

/// Filters for the sales data export
#[derive(Debug, Default, Deserialize)]
pub struct SalesExportFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

/// Filters for the stock history export
#[derive(Debug, Default, Deserialize)]
pub struct StockHistoryExportFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub admin_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub location: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SalesExportRow {
    date_sold: DateTime<Utc>,
    product_name: String,
    quantity: i32,
    amount: Decimal,
    seller_name: String,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct StockHistoryExportRow {
    created_at: DateTime<Utc>,
    admin_name: String,
    product_name: String,
    seller_name: String,
    location: String,
    change_amount: i32,
    reason: Option<String>,
}

impl ExportService {
    /// Create a new ExportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Export sales data as CSV bytes
    pub async fn sales_csv(&self, filter: SalesExportFilter) -> AppResult<Vec<u8>> {
        let location_pattern = filter
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, SalesExportRow>(
            r#"
            SELECT o.date_sold, p.name AS product_name, o.quantity, o.amount,
                   u.username AS seller_name, o.location, o.created_at
            FROM orders o
            JOIN products p ON p.id = o.product_id
            JOIN users u ON u.id = o.seller_id
            WHERE ($1::timestamptz IS NULL OR o.date_sold >= $1)
              AND ($2::timestamptz IS NULL OR o.date_sold <= $2)
              AND ($3::text IS NULL OR o.location ILIKE $3)
            ORDER BY o.date_sold
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&location_pattern)
        .fetch_all(&self.db)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "date_sold",
                "product",
                "quantity",
                "amount",
                "seller",
                "location",
                "created_at",
            ])
            .map_err(csv_error)?;

        for row in &rows {
            writer
                .write_record([
                    row.date_sold.to_rfc3339(),
                    row.product_name.clone(),
                    row.quantity.to_string(),
                    row.amount.to_string(),
                    row.seller_name.clone(),
                    row.location.clone().unwrap_or_default(),
                    row.created_at.to_rfc3339(),
                ])
                .map_err(csv_error)?;
        }

        finish(writer)
    }

    /// Export the stock adjustment audit trail as CSV bytes
    pub async fn stock_history_csv(
        &self,
        filter: StockHistoryExportFilter,
    ) -> AppResult<Vec<u8>> {
        let location_pattern = filter
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, StockHistoryExportRow>(
            r#"
            SELECT h.created_at, a.username AS admin_name, p.name AS product_name,
                   s.username AS seller_name, p.location, h.change_amount, h.reason
            FROM stock_history h
            JOIN users a ON a.id = h.admin_id
            JOIN products p ON p.id = h.product_id
            JOIN users s ON s.id = h.seller_id
            WHERE ($1::timestamptz IS NULL OR h.created_at >= $1)
              AND ($2::timestamptz IS NULL OR h.created_at <= $2)
              AND ($3::uuid IS NULL OR h.admin_id = $3)
              AND ($4::uuid IS NULL OR h.product_id = $4)
              AND ($5::text IS NULL OR p.location ILIKE $5)
            ORDER BY h.created_at
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.admin_id)
        .bind(filter.product_id)
        .bind(&location_pattern)
        .fetch_all(&self.db)
        .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "date",
                "admin",
                "product",
                "seller",
                "location",
                "change_amount",
                "reason",
            ])
            .map_err(csv_error)?;

        for row in &rows {
            writer
                .write_record([
                    row.created_at.to_rfc3339(),
                    row.admin_name.clone(),
                    row.product_name.clone(),
                    row.seller_name.clone(),
                    row.location.clone(),
                    row.change_amount.to_string(),
                    row.reason.clone().unwrap_or_default(),
                ])
                .map_err(csv_error)?;
        }

        finish(writer)
    }
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("CSV serialization failed: {}", e))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> AppResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))
}
