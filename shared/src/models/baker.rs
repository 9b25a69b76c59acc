//! Baker inventory submission models
//!
//! A submission carries two opaque JSON blobs as entered by the baker:
//! `purchases` (ingredients bought, with costs) and `breads` (bread types
//! produced, each with an `ingredients` list carrying usage costs). Both
//! arrive either as a JSON array or as a JSON object keyed by item name;
//! the derived totals tolerate both shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::types::SubmissionStatus;

/// A baker's purchase/usage log awaiting admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakerSubmission {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub purchases: Value,
    pub breads: Value,
    pub status: SubmissionStatus,
    pub date_sent: DateTime<Utc>,
}

impl BakerSubmission {
    /// Sum of `cost` over all purchase entries
    pub fn total_purchase_cost(&self) -> Decimal {
        total_purchase_cost(&self.purchases)
    }

    /// Sum of `usage_cost` (falling back to `cost`) over every ingredient
    /// of every bread entry
    pub fn total_usage_cost(&self) -> Decimal {
        total_usage_cost(&self.breads)
    }
}

/// Sum of `cost` over the entries of a purchases blob
pub fn total_purchase_cost(purchases: &Value) -> Decimal {
    entries(purchases)
        .map(|item| cost_field(item, "cost"))
        .sum()
}

/// Sum of ingredient usage costs over the entries of a breads blob
///
/// Each bread entry holds an `ingredients` array; an ingredient's cost is
/// its `usage_cost` when that key is present (a null value counts as
/// zero), otherwise its `cost`.
pub fn total_usage_cost(breads: &Value) -> Decimal {
    // An object blob carrying its own `ingredients` key is a single bread,
    // not a map of breads.
    let breads_iter: Box<dyn Iterator<Item = &Value>> = match breads {
        Value::Object(map) if map.contains_key("ingredients") => {
            Box::new(std::iter::once(breads))
        }
        other => entries(other),
    };

    breads_iter
        .flat_map(|bread| {
            bread
                .get("ingredients")
                .and_then(Value::as_array)
                .map(|a| a.as_slice())
                .unwrap_or(&[])
                .iter()
        })
        .map(|ing| {
            if ing.get("usage_cost").is_some() {
                cost_field(ing, "usage_cost")
            } else {
                cost_field(ing, "cost")
            }
        })
        .sum()
}

/// Iterate the values of a blob that is either an array or an object
fn entries(blob: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match blob {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

/// Read a numeric field, treating missing, null, or non-numeric as zero
fn cost_field(item: &Value, field: &str) -> Decimal {
    item.get(field)
        .and_then(|v| {
            if let Some(n) = v.as_i64() {
                Some(Decimal::from(n))
            } else {
                v.as_f64().and_then(Decimal::from_f64_retain)
            }
        })
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn purchase_cost_sums_list_entries() {
        let purchases = json!([
            {"name": "flour", "qty": 10, "cost": 2500},
            {"name": "sugar", "qty": 4, "cost": 800.5},
            {"name": "yeast", "qty": 2}
        ]);
        assert_eq!(
            total_purchase_cost(&purchases),
            Decimal::from(2500) + Decimal::from_f64_retain(800.5).unwrap()
        );
    }

    #[test]
    fn purchase_cost_sums_map_entries() {
        let purchases = json!({
            "flour": {"qty": 10, "cost": 1200},
            "butter": {"qty": 3, "cost": 450}
        });
        assert_eq!(total_purchase_cost(&purchases), Decimal::from(1650));
    }

    #[test]
    fn purchase_cost_treats_null_cost_as_zero() {
        let purchases = json!([{"name": "flour", "cost": null}, {"name": "salt"}]);
        assert_eq!(total_purchase_cost(&purchases), Decimal::ZERO);
    }

    #[test]
    fn usage_cost_prefers_usage_cost_over_cost() {
        let breads = json!([
            {
                "type": "agege",
                "ingredients": [
                    {"name": "flour", "cost": 100, "usage_cost": 60},
                    {"name": "sugar", "cost": 40}
                ]
            }
        ]);
        assert_eq!(total_usage_cost(&breads), Decimal::from(100));
    }

    #[test]
    fn null_usage_cost_does_not_fall_back_to_cost() {
        let breads = json!([
            {
                "type": "wheat",
                "ingredients": [
                    {"name": "flour", "cost": 100, "usage_cost": null},
                    {"name": "sugar", "cost": 40}
                ]
            }
        ]);
        // flour's usage_cost key exists, so its cost is never consulted
        assert_eq!(total_usage_cost(&breads), Decimal::from(40));
    }

    #[test]
    fn usage_cost_handles_single_object_blob() {
        let breads = json!({
            "ingredients": [{"name": "flour", "cost": 75}]
        });
        assert_eq!(total_usage_cost(&breads), Decimal::from(75));

        let breads = json!({
            "agege": {"ingredients": [{"name": "flour", "cost": 75}]}
        });
        assert_eq!(total_usage_cost(&breads), Decimal::from(75));
    }

    #[test]
    fn empty_blobs_total_zero() {
        assert_eq!(total_purchase_cost(&json!([])), Decimal::ZERO);
        assert_eq!(total_usage_cost(&json!({})), Decimal::ZERO);
        assert_eq!(total_purchase_cost(&Value::Null), Decimal::ZERO);
    }
}
