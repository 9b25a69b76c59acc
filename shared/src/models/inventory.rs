//! Per-seller inventory models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seller's holdings of one product
///
/// `quantity_in_stock` is decremented by order settlement and raised by
/// stock sync; `in_stock` mirrors it for dashboard display. `quantity_sold`
/// accumulates settled quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub quantity_in_stock: i32,
    pub quantity_sold: i32,
    pub in_stock: i32,
}
