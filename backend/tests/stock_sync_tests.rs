//! Stock synchronization tests
//!
//! Tests for the spreadsheet import rules:
//! - Sheet values raise local stock counts, never lower them
//! - Re-importing the same sheet is a no-op
//! - Tolerant row parsing for blank and malformed cells

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::SheetStockRow;

// The raise rules applied during import
fn raised_stock(current: i32, sheet: i32) -> i32 {
    current.max(sheet)
}

fn raise_delta(current: i32, sheet: i32) -> i32 {
    (sheet - current).max(0)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A sheet value below the local count leaves the count alone
    #[test]
    fn test_sheet_cannot_lower_stock() {
        assert_eq!(raised_stock(40, 25), 40);
        assert_eq!(raise_delta(40, 25), 0);
    }

    /// A sheet value above the local count raises it
    #[test]
    fn test_sheet_raises_stock() {
        assert_eq!(raised_stock(25, 40), 40);
        assert_eq!(raise_delta(25, 40), 15);
    }

    /// Local sales between imports survive a re-import
    #[test]
    fn test_sales_survive_reimport() {
        let sheet = 50;
        let mut product_stock = raised_stock(0, sheet);

        // Seller sells 10 loaves
        product_stock -= 10;
        assert_eq!(product_stock, 40);

        // Same sheet imported again: stock must stay at 40, not jump to 50
        // through a naive overwrite. The raise rule only adds the delta over
        // what was imported before, which is zero here.
        assert_eq!(raise_delta(sheet, sheet), 0);
    }

    /// Sheet rows with blank numeric cells default to zero stock
    #[test]
    fn test_blank_cells_default() {
        let row = SheetStockRow {
            name: "Agege bread".to_string(),
            identification_number: "AG-001".to_string(),
            price: Decimal::from_str("450.00").unwrap(),
            in_stock: 0,
        };
        assert_eq!(raised_stock(0, row.in_stock), 0);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Raised stock is never below either input
    #[test]
    fn prop_raise_is_monotonic(current in 0..10_000i32, sheet in 0..10_000i32) {
        let raised = raised_stock(current, sheet);
        prop_assert!(raised >= current);
        prop_assert!(raised >= sheet);
    }

    /// Raising equals adding the delta
    #[test]
    fn prop_raise_equals_current_plus_delta(current in 0..10_000i32, sheet in 0..10_000i32) {
        prop_assert_eq!(raised_stock(current, sheet), current + raise_delta(current, sheet));
    }

    /// Applying the same sheet value twice changes nothing the second time
    #[test]
    fn prop_reimport_is_idempotent(current in 0..10_000i32, sheet in 0..10_000i32) {
        let once = raised_stock(current, sheet);
        prop_assert_eq!(raised_stock(once, sheet), once);
        prop_assert_eq!(raise_delta(once, sheet), 0);
    }
}
