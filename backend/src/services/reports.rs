//! Reporting service
//!
//! Reports are computed with plain linear scans over the fetched rows. The
//! cost totals only count approved baker submissions, and profit is sales
//! minus the usage cost of the bread actually produced.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::AppResult;
use shared::models::{total_purchase_cost, total_usage_cost};

/// Reporting service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

/// One sales line in a location report
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SalesLine {
    pub product_name: String,
    pub seller_name: String,
    pub quantity: i32,
    pub selling_price: Decimal,
    pub amount: Decimal,
    pub date_sold: DateTime<Utc>,
}

/// Quantity ranking entry (seller or product)
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct QuantityRank {
    pub name: String,
    pub quantity: i64,
}

/// Full report for one location
#[derive(Debug, Serialize)]
pub struct LocationReport {
    pub location: String,
    pub sales: Vec<SalesLine>,
    pub best_seller: Option<QuantityRank>,
    pub top_products: Vec<QuantityRank>,
    pub total_sales: Decimal,
    pub total_purchase_cost: Decimal,
    pub total_usage_cost: Decimal,
    pub profit_loss: Decimal,
}

/// Global financial summary
#[derive(Debug, Serialize)]
pub struct FinancialSummary {
    pub total_sales: Decimal,
    pub total_purchase_cost: Decimal,
    pub total_usage_cost: Decimal,
    pub profit_loss: Decimal,
    pub order_count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct SubmissionBlobs {
    purchases: Value,
    breads: Value,
}

/// Tally quantities by name and return the largest
pub fn best_by_quantity(pairs: &[(String, i32)]) -> Option<QuantityRank> {
    let mut ranked = rank_by_quantity(pairs);
    if ranked.is_empty() {
        None
    } else {
        Some(ranked.swap_remove(0))
    }
}

/// Tally quantities by name, descending
pub fn rank_by_quantity(pairs: &[(String, i32)]) -> Vec<QuantityRank> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for (name, quantity) in pairs {
        *totals.entry(name.as_str()).or_insert(0) += i64::from(*quantity);
    }

    let mut ranked: Vec<QuantityRank> = totals
        .into_iter()
        .map(|(name, quantity)| QuantityRank {
            name: name.to_string(),
            quantity,
        })
        .collect();
    // Name as tiebreaker keeps the ordering stable across runs
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
    ranked
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Sales report for one location
    pub async fn location_report(&self, location: &str) -> AppResult<LocationReport> {
        let pattern = format!("%{}%", location.trim());

        #[derive(sqlx::FromRow)]
        struct OrderRow {
            product_name: String,
            seller_name: String,
            quantity: i32,
            selling_price: Decimal,
            amount: Decimal,
            date_sold: DateTime<Utc>,
        }

        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT p.name AS product_name, u.username AS seller_name,
                   o.quantity, o.selling_price, o.amount, o.date_sold
            FROM orders o
            JOIN products p ON p.id = o.product_id
            JOIN users u ON u.id = o.seller_id
            WHERE o.location ILIKE $1
            ORDER BY o.date_sold DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.db)
        .await?;

        let total_sales: Decimal = orders.iter().map(|o| o.amount).sum();

        let seller_pairs: Vec<(String, i32)> = orders
            .iter()
            .map(|o| (o.seller_name.clone(), o.quantity))
            .collect();
        let product_pairs: Vec<(String, i32)> = orders
            .iter()
            .map(|o| (o.product_name.clone(), o.quantity))
            .collect();

        let best_seller = best_by_quantity(&seller_pairs);
        let mut top_products = rank_by_quantity(&product_pairs);
        top_products.truncate(5);

        let (purchase_cost, usage_cost) = self.approved_cost_totals().await?;

        let sales = orders
            .into_iter()
            .map(|o| SalesLine {
                product_name: o.product_name,
                seller_name: o.seller_name,
                quantity: o.quantity,
                selling_price: o.selling_price,
                amount: o.amount,
                date_sold: o.date_sold,
            })
            .collect();

        Ok(LocationReport {
            location: location.trim().to_string(),
            sales,
            best_seller,
            top_products,
            total_sales,
            total_purchase_cost: purchase_cost,
            total_usage_cost: usage_cost,
            profit_loss: total_sales - usage_cost,
        })
    }

    /// Global totals across all orders and approved submissions
    pub async fn financial_summary(&self) -> AppResult<FinancialSummary> {
        #[derive(sqlx::FromRow)]
        struct Totals {
            total_sales: Option<Decimal>,
            order_count: i64,
        }

        let totals = sqlx::query_as::<_, Totals>(
            "SELECT SUM(amount) AS total_sales, COUNT(*) AS order_count FROM orders",
        )
        .fetch_one(&self.db)
        .await?;

        let total_sales = totals.total_sales.unwrap_or(Decimal::ZERO);
        let (purchase_cost, usage_cost) = self.approved_cost_totals().await?;

        Ok(FinancialSummary {
            total_sales,
            total_purchase_cost: purchase_cost,
            total_usage_cost: usage_cost,
            profit_loss: total_sales - usage_cost,
            order_count: totals.order_count,
        })
    }

    /// Sum the two cost totals over every approved submission
    async fn approved_cost_totals(&self) -> AppResult<(Decimal, Decimal)> {
        let submissions = sqlx::query_as::<_, SubmissionBlobs>(
            "SELECT purchases, breads FROM baker_submissions WHERE status = 'approved'",
        )
        .fetch_all(&self.db)
        .await?;

        let mut purchase_cost = Decimal::ZERO;
        let mut usage_cost = Decimal::ZERO;
        for submission in &submissions {
            purchase_cost += total_purchase_cost(&submission.purchases);
            usage_cost += total_usage_cost(&submission.breads);
        }

        Ok((purchase_cost, usage_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, i32)]) -> Vec<(String, i32)> {
        raw.iter().map(|(n, q)| (n.to_string(), *q)).collect()
    }

    #[test]
    fn best_seller_is_quantity_max() {
        let sales = pairs(&[("ade", 5), ("bola", 9), ("ade", 3)]);
        let best = best_by_quantity(&sales).unwrap();
        assert_eq!(best.name, "bola");
        assert_eq!(best.quantity, 9);
    }

    #[test]
    fn ranking_aggregates_and_sorts_descending() {
        let sales = pairs(&[("agege", 4), ("wheat", 10), ("agege", 7), ("coconut", 2)]);
        let ranked = rank_by_quantity(&sales);
        assert_eq!(ranked[0].name, "agege");
        assert_eq!(ranked[0].quantity, 11);
        assert_eq!(ranked[1].name, "wheat");
        assert_eq!(ranked[2].name, "coconut");
    }

    #[test]
    fn empty_sales_have_no_best_seller() {
        assert!(best_by_quantity(&[]).is_none());
        assert!(rank_by_quantity(&[]).is_empty());
    }
}
