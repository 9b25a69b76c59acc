//! Order settlement tests
//!
//! Tests for the settlement arithmetic and preconditions:
//! - amount = quantity x selling_price
//! - settlement is rejected when either counter cannot cover the quantity
//! - a rejected settlement leaves every counter unchanged

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::order_amount;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// The settlement preconditions as checked before any counter moves
fn can_settle(inventory_stock: i32, product_stock: i32, quantity: i32) -> bool {
    quantity > 0 && inventory_stock >= quantity && product_stock >= quantity
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Amount is the plain product of quantity and price
    #[test]
    fn test_amount_calculation() {
        assert_eq!(order_amount(3, dec("450.00")), dec("1350.00"));
        assert_eq!(order_amount(1, dec("0.50")), dec("0.50"));
        assert_eq!(order_amount(10, dec("99.99")), dec("999.90"));
    }

    /// Settlement requires both counters to cover the quantity
    #[test]
    fn test_settlement_preconditions() {
        assert!(can_settle(10, 10, 5));
        assert!(can_settle(5, 5, 5));

        // Seller's inventory short
        assert!(!can_settle(3, 10, 5));
        // Global product counter short
        assert!(!can_settle(10, 3, 5));
        // Zero or negative quantities never settle
        assert!(!can_settle(10, 10, 0));
        assert!(!can_settle(10, 10, -1));
    }

    /// A rejected settlement must not move any counter
    #[test]
    fn test_rejection_leaves_counters_unchanged() {
        let inventory_stock = 4;
        let product_stock = 4;
        let quantity = 5;

        let (inv_after, prod_after) = if can_settle(inventory_stock, product_stock, quantity) {
            (inventory_stock - quantity, product_stock - quantity)
        } else {
            (inventory_stock, product_stock)
        };

        assert_eq!(inv_after, inventory_stock);
        assert_eq!(prod_after, product_stock);
    }

    /// A successful settlement decrements both counters by the quantity
    #[test]
    fn test_settlement_decrements_both_counters() {
        let inventory_stock = 20;
        let product_stock = 35;
        let quantity = 8;

        assert!(can_settle(inventory_stock, product_stock, quantity));
        assert_eq!(inventory_stock - quantity, 12);
        assert_eq!(product_stock - quantity, 27);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// amount = quantity x selling_price for any quantity and price
    #[test]
    fn prop_amount_is_quantity_times_price(
        quantity in 1..1_000i32,
        price_cents in 0..1_000_000i64,
    ) {
        let price = Decimal::new(price_cents, 2);
        let amount = order_amount(quantity, price);
        prop_assert_eq!(amount, Decimal::from(quantity) * price);
    }

    /// Settlement never drives a counter negative
    #[test]
    fn prop_settlement_never_goes_negative(
        inventory_stock in 0..1_000i32,
        product_stock in 0..1_000i32,
        quantity in 1..1_000i32,
    ) {
        if can_settle(inventory_stock, product_stock, quantity) {
            prop_assert!(inventory_stock - quantity >= 0);
            prop_assert!(product_stock - quantity >= 0);
        }
    }
}
