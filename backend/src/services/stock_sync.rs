//! Stock synchronization service
//!
//! Reconciles the per-location product ledger against the location's
//! spreadsheet tab. The sync is one-way and monotonic: sheet values only
//! ever raise local stock counts, never lower them, so a re-import after
//! local sales cannot undo the sales. Each product's changes commit
//! individually; a failing row does not roll back the rows before it.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::SheetsClient;
use shared::models::SheetStockRow;

/// Stock synchronization service
#[derive(Clone)]
pub struct StockSyncService {
    db: PgPool,
    sheets: SheetsClient,
}

/// Outcome of one import run
#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub location: String,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub sellers: usize,
    pub products_created: usize,
    pub products_updated: usize,
    pub inventories_created: usize,
    pub inventories_raised: usize,
}

/// Existing product fields relevant to the sync
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    in_stock: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    id: Uuid,
    quantity_in_stock: i32,
}

/// The stock count after applying a sheet value: raised, never lowered
pub fn raised_stock(current: i32, sheet: i32) -> i32 {
    current.max(sheet)
}

/// How much a sheet value adds to a counter (zero when the sheet is behind)
pub fn raise_delta(current: i32, sheet: i32) -> i32 {
    (sheet - current).max(0)
}

impl StockSyncService {
    /// Create a new StockSyncService instance
    pub fn new(db: PgPool, sheets: SheetsClient) -> Self {
        Self { db, sheets }
    }

    /// Import one location's tab into the local ledger
    pub async fn import_location(&self, location: &str) -> AppResult<ImportSummary> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AppError::Validation {
                field: "location".to_string(),
                message: "Please select a location before importing".to_string(),
            });
        }

        // The tab must exist before we try to read a range from it
        let tabs = self.sheets.list_tabs().await?;
        if !tabs.iter().any(|t| t == location) {
            tracing::warn!(%location, available = ?tabs, "Sheet tab not found");
            return Err(AppError::NotFound(format!("Sheet tab '{}'", location)));
        }

        let rows = self.sheets.fetch_rows(location).await?;

        let sellers = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE role = 'seller' AND LOWER(location) = LOWER($1)",
        )
        .bind(location)
        .fetch_all(&self.db)
        .await?;

        let mut summary = ImportSummary {
            location: location.to_string(),
            rows_read: rows.len(),
            sellers: sellers.len(),
            ..Default::default()
        };

        if sellers.is_empty() {
            tracing::warn!(%location, "No sellers at location; nothing imported");
            return Ok(summary);
        }

        for row in &rows {
            // Rows without an identifier cannot be keyed
            if row.identification_number.trim().is_empty() || row.name.trim().is_empty() {
                summary.rows_skipped += 1;
                continue;
            }
            self.apply_row(location, row, &sellers, &mut summary).await?;
        }

        tracing::info!(
            %location,
            rows = summary.rows_read,
            created = summary.products_created,
            updated = summary.products_updated,
            "Stock import completed"
        );

        Ok(summary)
    }

    /// Reconcile one sheet row against the product ledger and the sellers'
    /// inventory projections
    async fn apply_row(
        &self,
        location: &str,
        row: &SheetStockRow,
        sellers: &[Uuid],
        summary: &mut ImportSummary,
    ) -> AppResult<()> {
        let existing = sqlx::query_as::<_, ProductRow>(
            "SELECT id, in_stock FROM products WHERE identification_number = $1 AND location = $2",
        )
        .bind(&row.identification_number)
        .bind(location)
        .fetch_optional(&self.db)
        .await?;

        let product_id = match existing {
            None => {
                let product_id = sqlx::query_scalar::<_, Uuid>(
                    r#"
                    INSERT INTO products (name, identification_number, price, selling_price, in_stock, location)
                    VALUES ($1, $2, $3, NULL, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(&row.name)
                .bind(&row.identification_number)
                .bind(row.price)
                .bind(row.in_stock)
                .bind(location)
                .fetch_one(&self.db)
                .await?;

                summary.products_created += 1;
                product_id
            }
            Some(product) => {
                // Name and price follow the sheet; stock only ever rises
                sqlx::query(
                    "UPDATE products SET name = $1, price = $2, in_stock = $3 WHERE id = $4",
                )
                .bind(&row.name)
                .bind(row.price)
                .bind(raised_stock(product.in_stock, row.in_stock))
                .bind(product.id)
                .execute(&self.db)
                .await?;

                summary.products_updated += 1;
                product.id
            }
        };

        for &seller_id in sellers {
            self.project_inventory(product_id, seller_id, row.in_stock, summary)
                .await?;
        }

        Ok(())
    }

    /// Ensure a seller's inventory row exists and mirrors the sheet delta
    async fn project_inventory(
        &self,
        product_id: Uuid,
        seller_id: Uuid,
        sheet_stock: i32,
        summary: &mut ImportSummary,
    ) -> AppResult<()> {
        let inventory = sqlx::query_as::<_, InventoryRow>(
            "SELECT id, quantity_in_stock FROM inventories WHERE product_id = $1 AND seller_id = $2",
        )
        .bind(product_id)
        .bind(seller_id)
        .fetch_optional(&self.db)
        .await?;

        match inventory {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO inventories (product_id, seller_id, quantity_in_stock, quantity_sold, in_stock)
                    VALUES ($1, $2, $3, 0, $3)
                    "#,
                )
                .bind(product_id)
                .bind(seller_id)
                .bind(sheet_stock)
                .execute(&self.db)
                .await?;

                summary.inventories_created += 1;
            }
            Some(inv) => {
                let delta = raise_delta(inv.quantity_in_stock, sheet_stock);
                if delta > 0 {
                    sqlx::query(
                        r#"
                        UPDATE inventories
                        SET quantity_in_stock = quantity_in_stock + $1, in_stock = in_stock + $1
                        WHERE id = $2
                        "#,
                    )
                    .bind(delta)
                    .bind(inv.id)
                    .execute(&self.db)
                    .await?;

                    summary.inventories_raised += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_never_lowered_by_sheet() {
        assert_eq!(raised_stock(40, 25), 40);
        assert_eq!(raised_stock(25, 40), 40);
        assert_eq!(raised_stock(30, 30), 30);
    }

    #[test]
    fn delta_zero_when_sheet_behind() {
        assert_eq!(raise_delta(40, 25), 0);
        assert_eq!(raise_delta(25, 40), 15);
        assert_eq!(raise_delta(0, 0), 0);
    }

    #[test]
    fn reapplying_sheet_value_is_idempotent() {
        // Importing the same sheet twice must not move any counter
        let once = raised_stock(20, 35);
        let twice = raised_stock(once, 35);
        assert_eq!(once, twice);
        assert_eq!(raise_delta(once, 35), 0);
    }
}
