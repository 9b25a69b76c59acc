//! Credit sale tests
//!
//! Tests for the debt tracking rules:
//! - fully_paid is derived from the amount owing
//! - unpaid records cannot be deleted

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::is_fully_paid;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Zero or overpaid balances count as fully paid
    #[test]
    fn test_fully_paid_at_zero() {
        assert!(is_fully_paid(Decimal::ZERO));
        assert!(is_fully_paid(dec("-10.00")));
    }

    /// Any positive balance is an open debt
    #[test]
    fn test_open_debt() {
        assert!(!is_fully_paid(dec("0.01")));
        assert!(!is_fully_paid(dec("5000")));
    }

    /// Paying a debt down recomputes the flag
    #[test]
    fn test_payment_flips_flag() {
        let mut owing = dec("1500.00");
        assert!(!is_fully_paid(owing));

        owing -= dec("500.00");
        assert!(!is_fully_paid(owing));

        owing -= dec("1000.00");
        assert!(is_fully_paid(owing));
    }

    /// Deletion is gated on the derived flag
    #[test]
    fn test_deletion_requires_cleared_debt() {
        let deletable = |owing: Decimal| is_fully_paid(owing);

        assert!(!deletable(dec("200.00")));
        assert!(deletable(Decimal::ZERO));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// fully_paid holds exactly when nothing is owed
    #[test]
    fn prop_fully_paid_iff_nothing_owed(cents in -1_000_000..1_000_000i64) {
        let owing = Decimal::new(cents, 2);
        prop_assert_eq!(is_fully_paid(owing), owing <= Decimal::ZERO);
    }
}
