//! Order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of a settled sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub quantity: i32,
    pub selling_price: Decimal,
    pub amount: Decimal,
    /// Product stock remaining at settlement time
    pub in_stock: i32,
    pub location: Option<String>,
    pub date_sold: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Compute the amount charged for a settled order
pub fn order_amount(quantity: i32, selling_price: Decimal) -> Decimal {
    Decimal::from(quantity) * selling_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn amount_is_quantity_times_price() {
        let price = Decimal::from_str("350.50").unwrap();
        assert_eq!(order_amount(4, price), Decimal::from_str("1402.00").unwrap());
        assert_eq!(order_amount(0, price), Decimal::ZERO);
    }
}
