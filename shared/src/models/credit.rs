//! Credit sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sale made on credit, tracked until the customer pays it off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditSale {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub bread_type: String,
    pub quantity: i32,
    pub amount_owing: Decimal,
    pub fully_paid: bool,
    pub seller_id: Uuid,
    pub date_time: DateTime<Utc>,
}

/// A credit record is settled once nothing is owed
pub fn is_fully_paid(amount_owing: Decimal) -> bool {
    amount_owing <= Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_when_nothing_owed() {
        assert!(is_fully_paid(Decimal::ZERO));
        assert!(is_fully_paid(Decimal::from(-5)));
        assert!(!is_fully_paid(Decimal::from(1)));
    }
}
