//! Registration validation tests
//!
//! Tests for the input validation helpers:
//! - location normalization and whitelist matching
//! - username, password, role and quantity rules

use proptest::prelude::*;

use shared::types::Role;
use shared::validation::{
    normalize_location, validate_location, validate_password, validate_quantity, validate_role,
    validate_username,
};

fn allowed() -> Vec<String> {
    vec!["Ikota".to_string(), "Ajah".to_string(), "Badore".to_string()]
}

#[cfg(test)]
mod location_tests {
    use super::*;

    /// Any spelling containing "ikota" normalizes to the canonical name
    #[test]
    fn test_ikota_normalization() {
        assert_eq!(normalize_location("ikota"), "Ikota");
        assert_eq!(normalize_location("IKOTA"), "Ikota");
        assert_eq!(normalize_location("Ikota Phase 2"), "Ikota");
        assert_eq!(normalize_location("  ikOTa  "), "Ikota");
    }

    /// Other locations pass through trimmed
    #[test]
    fn test_other_locations_trimmed() {
        assert_eq!(normalize_location("  Ajah "), "Ajah");
        assert_eq!(normalize_location("Badore"), "Badore");
    }

    /// Unknown locations are rejected at registration
    #[test]
    fn test_location_whitelist() {
        let allowed = allowed();
        assert!(validate_location("Ikota", &allowed).is_ok());
        assert!(validate_location("Ajah", &allowed).is_ok());
        assert!(validate_location("Lekki", &allowed).is_err());
        assert!(validate_location("", &allowed).is_err());
    }
}

#[cfg(test)]
mod account_tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ade").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(" padded ").is_err());
        assert!(validate_username(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("abc").is_err());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(validate_role("seller"), Ok(Role::Seller));
        assert_eq!(validate_role("ADMIN"), Ok(Role::Admin));
        assert_eq!(validate_role("Baker"), Ok(Role::Baker));
        assert!(validate_role("manager").is_err());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

/// Random casings and paddings of "ikota" embedded in other text
fn ikota_strategy() -> impl Strategy<Value = String> {
    "[ a-z]{0,6}[iI][kK][oO][tT][aA][ a-z]{0,6}"
}

proptest! {
    /// Every string containing "ikota" in any case maps to "Ikota"
    #[test]
    fn prop_ikota_always_canonical(raw in ikota_strategy()) {
        prop_assert_eq!(normalize_location(&raw), "Ikota");
    }

    /// Normalization is idempotent
    #[test]
    fn prop_normalization_idempotent(raw in "[A-Za-z ]{1,20}") {
        let once = normalize_location(&raw);
        prop_assert_eq!(normalize_location(&once), once.clone());
    }
}
