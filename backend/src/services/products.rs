//! Product catalog and manual stock adjustments

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// A product as listed to clients
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ProductListing {
    pub id: Uuid,
    pub name: String,
    pub identification_number: String,
    pub price: Decimal,
    pub selling_price: Option<Decimal>,
    pub in_stock: i32,
    pub location: String,
}

/// Input for a manual stock adjustment by the admin
#[derive(Debug, Deserialize)]
pub struct AdjustStockInput {
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub change_amount: i32,
    pub reason: Option<String>,
}

/// A seller's view of one inventory line
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct InventoryLine {
    pub inventory_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub identification_number: String,
    pub price: Decimal,
    pub selling_price: Option<Decimal>,
    pub quantity_in_stock: i32,
    pub quantity_sold: i32,
}

/// Tables holding product-keyed rows, cleared before their product goes.
/// Credit sales are keyed by seller and bread type, not by product, and
/// survive catalog deletions.
const PRODUCT_CASCADE: [&str; 3] = ["orders", "stock_history", "inventories"];

/// A stock history entry as listed for the admin
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct StockHistoryListing {
    pub id: Uuid,
    pub admin_name: String,
    pub product_name: String,
    pub seller_name: String,
    pub change_amount: i32,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List every product, optionally filtered by a name or identifier search
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<ProductListing>> {
        let products = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, ProductListing>(
                    r#"
                    SELECT id, name, identification_number, price, selling_price, in_stock, location
                    FROM products
                    WHERE name ILIKE $1 OR identification_number ILIKE $1
                    ORDER BY name
                    "#,
                )
                .bind(&pattern)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductListing>(
                    r#"
                    SELECT id, name, identification_number, price, selling_price, in_stock, location
                    FROM products
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(products)
    }

    /// List products for one location
    pub async fn list_by_location(&self, location: &str) -> AppResult<Vec<ProductListing>> {
        let products = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT id, name, identification_number, price, selling_price, in_stock, location
            FROM products
            WHERE LOWER(location) = LOWER($1)
            ORDER BY name
            "#,
        )
        .bind(location)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// A seller's inventory joined with the product catalog
    pub async fn seller_inventory(&self, seller_id: Uuid) -> AppResult<Vec<InventoryLine>> {
        let lines = sqlx::query_as::<_, InventoryLine>(
            r#"
            SELECT i.id AS inventory_id, p.id AS product_id, p.name AS product_name,
                   p.identification_number, p.price, p.selling_price,
                   i.quantity_in_stock, i.quantity_sold
            FROM inventories i
            JOIN products p ON p.id = i.product_id
            WHERE i.seller_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.db)
        .await?;

        Ok(lines)
    }

    /// Delete one product and everything that references it
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        for table in PRODUCT_CASCADE {
            sqlx::query(&format!("DELETE FROM {} WHERE product_id = $1", table))
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%product_id, "Product and related records deleted");
        Ok(())
    }

    /// Wipe the entire catalog and everything hanging off it
    pub async fn delete_all(&self) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;

        for table in PRODUCT_CASCADE {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        let result = sqlx::query("DELETE FROM products").execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(deleted = result.rows_affected(), "Product catalog cleared");
        Ok(result.rows_affected())
    }

    /// Manually adjust a seller's stock for one product, leaving an audit
    /// trail entry
    ///
    /// The change may be negative but must not push either counter below
    /// zero.
    pub async fn adjust_stock(&self, admin_id: Uuid, input: AdjustStockInput) -> AppResult<()> {
        if input.change_amount == 0 {
            return Err(AppError::Validation {
                field: "change_amount".to_string(),
                message: "Change amount must not be zero".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let inventory = sqlx::query_as::<_, (Uuid, i32)>(
            "SELECT id, quantity_in_stock FROM inventories WHERE product_id = $1 AND seller_id = $2",
        )
        .bind(input.product_id)
        .bind(input.seller_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))?;

        let product_stock = sqlx::query_scalar::<_, i32>(
            "SELECT in_stock FROM products WHERE id = $1",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if inventory.1 + input.change_amount < 0 || product_stock + input.change_amount < 0 {
            return Err(AppError::InsufficientStock(
                "Adjustment would take stock below zero".to_string(),
            ));
        }

        sqlx::query(
            r#"
            UPDATE inventories
            SET quantity_in_stock = quantity_in_stock + $1, in_stock = in_stock + $1
            WHERE id = $2
            "#,
        )
        .bind(input.change_amount)
        .bind(inventory.0)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET in_stock = in_stock + $1 WHERE id = $2")
            .bind(input.change_amount)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO stock_history (admin_id, product_id, seller_id, change_amount, reason)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(admin_id)
        .bind(input.product_id)
        .bind(input.seller_id)
        .bind(input.change_amount)
        .bind(&input.reason)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            %admin_id,
            product_id = %input.product_id,
            seller_id = %input.seller_id,
            change = input.change_amount,
            "Stock adjusted manually"
        );
        Ok(())
    }

    /// Stock adjustment audit trail, newest first
    pub async fn stock_history(&self) -> AppResult<Vec<StockHistoryListing>> {
        let entries = sqlx::query_as::<_, StockHistoryListing>(
            r#"
            SELECT h.id, a.username AS admin_name, p.name AS product_name,
                   s.username AS seller_name, h.change_amount, h.reason, h.created_at
            FROM stock_history h
            JOIN users a ON a.id = h.admin_id
            JOIN products p ON p.id = h.product_id
            JOIN users s ON s.id = h.seller_id
            ORDER BY h.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = include_str!("../../migrations/20240115000000_initial_schema.sql");

    fn table_ddl(name: &str) -> &'static str {
        let start = SCHEMA
            .find(&format!("CREATE TABLE {} (", name))
            .unwrap_or_else(|| panic!("table {} missing from schema", name));
        let end = SCHEMA[start..].find(");").unwrap() + start;
        &SCHEMA[start..end]
    }

    /// Every cascade target must actually carry a product_id column, and
    /// nothing outside the cascade may be deleted with a product
    #[test]
    fn cascade_matches_product_keyed_tables() {
        for table in PRODUCT_CASCADE {
            assert!(
                table_ddl(table).contains("product_id"),
                "{} is not product-keyed",
                table
            );
        }
    }

    /// Clearing the catalog must leave customers' debt records alone
    #[test]
    fn credit_sales_survive_catalog_deletion() {
        assert!(!PRODUCT_CASCADE.contains(&"credit_sales"));
        assert!(!table_ddl("credit_sales").contains("product_id"));
    }
}
