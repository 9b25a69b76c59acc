//! Order settlement service
//!
//! Settling an order decrements the seller's inventory and the product
//! counter, records the sale, and pushes the new stock value back to the
//! location's spreadsheet tab. The local mutation is atomic; the sheet push
//! is best effort and deliberately at-most-once: a failure is logged and the
//! sale stands, leaving the sheet to be corrected by the next sync.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::SheetsClient;
use shared::models::order_amount;
use shared::validation::{validate_price, validate_quantity};

/// Order settlement service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
    sheets: SheetsClient,
}

/// Input for settling an order
#[derive(Debug, Deserialize)]
pub struct SettleOrderInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub selling_price: Decimal,
    /// Sale timestamp from the client; defaults to now
    pub date_sold: Option<DateTime<Utc>>,
}

/// Response after settling an order
#[derive(Debug, Serialize)]
pub struct SettledOrder {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub amount: Decimal,
    pub remaining_stock: i32,
}

/// An order as listed for the admin
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct OrderListing {
    pub id: Uuid,
    pub product_name: String,
    pub identification_number: String,
    pub seller_name: String,
    pub quantity: i32,
    pub selling_price: Decimal,
    pub amount: Decimal,
    pub location: Option<String>,
    pub date_sold: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    name: String,
    identification_number: String,
    in_stock: i32,
    location: String,
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    id: Uuid,
    quantity_in_stock: i32,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool, sheets: SheetsClient) -> Self {
        Self { db, sheets }
    }

    /// Settle an order for a seller
    ///
    /// Preconditions are checked inside one transaction: the seller's
    /// inventory and the product's global counter must both cover the
    /// quantity, otherwise nothing moves and the caller gets a rejection.
    pub async fn settle(
        &self,
        seller_id: Uuid,
        seller_location: Option<&str>,
        input: SettleOrderInput,
    ) -> AppResult<SettledOrder> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_price(input.selling_price).map_err(|msg| AppError::Validation {
            field: "selling_price".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let product = sqlx::query_as::<_, ProductRow>(
            "SELECT name, identification_number, in_stock, location FROM products WHERE id = $1",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let inventory = sqlx::query_as::<_, InventoryRow>(
            "SELECT id, quantity_in_stock FROM inventories WHERE product_id = $1 AND seller_id = $2",
        )
        .bind(input.product_id)
        .bind(seller_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))?;

        if inventory.quantity_in_stock < input.quantity || product.in_stock < input.quantity {
            return Err(AppError::InsufficientStock(format!(
                "Not enough stock available for {}",
                product.name
            )));
        }

        let new_product_stock = product.in_stock - input.quantity;
        let amount = order_amount(input.quantity, input.selling_price);
        let date_sold = input.date_sold.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            UPDATE inventories
            SET quantity_in_stock = quantity_in_stock - $1,
                quantity_sold = quantity_sold + $1,
                in_stock = quantity_in_stock - $1
            WHERE id = $2
            "#,
        )
        .bind(input.quantity)
        .bind(inventory.id)
        .execute(&mut *tx)
        .await?;

        // The latest sale price sticks to the product for display
        sqlx::query("UPDATE products SET in_stock = $1, selling_price = $2 WHERE id = $3")
            .bind(new_product_stock)
            .bind(input.selling_price)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO orders (product_id, seller_id, quantity, selling_price, amount, in_stock, location, date_sold)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(input.product_id)
        .bind(seller_id)
        .bind(input.quantity)
        .bind(input.selling_price)
        .bind(amount)
        .bind(new_product_stock)
        .bind(seller_location)
        .bind(date_sold)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        // Best-effort sheet push; the sale stands either way
        match self
            .sheets
            .update_stock(
                &product.location,
                &product.identification_number,
                new_product_stock,
            )
            .await
        {
            Ok(true) => {}
            Ok(false) => tracing::warn!(
                location = %product.location,
                identification_number = %product.identification_number,
                "Product row not found in sheet; stock not pushed"
            ),
            Err(e) => tracing::warn!(
                location = %product.location,
                error = %e,
                "Failed to push stock to sheet"
            ),
        }

        tracing::info!(%order_id, %seller_id, quantity = input.quantity, "Order settled");

        Ok(SettledOrder {
            order_id,
            product_id: input.product_id,
            quantity: input.quantity,
            amount,
            remaining_stock: new_product_stock,
        })
    }

    /// List orders for a location (case-insensitive substring match)
    pub async fn list_by_location(&self, location: &str) -> AppResult<Vec<OrderListing>> {
        let pattern = format!("%{}%", location);
        let orders = sqlx::query_as::<_, OrderListing>(
            r#"
            SELECT o.id, p.name AS product_name, p.identification_number,
                   u.username AS seller_name, o.quantity, o.selling_price, o.amount,
                   o.location, o.date_sold, o.created_at
            FROM orders o
            JOIN products p ON p.id = o.product_id
            JOIN users u ON u.id = o.seller_id
            WHERE o.location ILIKE $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Distinct locations that have recorded orders
    pub async fn order_locations(&self) -> AppResult<Vec<String>> {
        let locations = sqlx::query_scalar::<_, Option<String>>(
            "SELECT DISTINCT location FROM orders ORDER BY location",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations.into_iter().flatten().collect())
    }

    /// Delete every sales record for a location
    pub async fn delete_by_location(&self, location: &str) -> AppResult<u64> {
        if location.trim().is_empty() {
            return Err(AppError::Validation {
                field: "location".to_string(),
                message: "Location is required".to_string(),
            });
        }

        let result = sqlx::query(
            r#"
            DELETE FROM orders
            WHERE product_id IN (SELECT id FROM products WHERE location = $1)
            "#,
        )
        .bind(location)
        .execute(&self.db)
        .await?;

        tracing::info!(%location, deleted = result.rows_affected(), "Sales records deleted");
        Ok(result.rows_affected())
    }
}
