//! Stock history models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An audit record of a manual stock adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockHistory {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    /// Signed delta applied to the seller's stock
    pub change_amount: i32,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
