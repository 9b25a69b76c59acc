//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product in the per-location catalog
///
/// Products are unique per (identification_number, location); the same
/// identifier sold at two locations is two distinct rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub identification_number: String,
    pub price: Decimal,
    pub selling_price: Option<Decimal>,
    pub in_stock: i32,
    pub location: String,
}

/// A product row as read from a spreadsheet tab (columns A-D)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetStockRow {
    pub name: String,
    pub identification_number: String,
    pub price: Decimal,
    pub in_stock: i32,
}
