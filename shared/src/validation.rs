//! Validation utilities for the Bakery Retail Management Platform

use rust_decimal::Decimal;

use crate::types::Role;

// ============================================================================
// Location Validations
// ============================================================================

/// Normalize a location name the way registrations are recorded
///
/// Any input mentioning "ikota" (the complex carries several written forms)
/// collapses to plain "Ikota"; everything else is kept trimmed as entered.
pub fn normalize_location(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.to_lowercase().contains("ikota") {
        "Ikota".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate a normalized location against the configured selling points
pub fn validate_location(location: &str, allowed: &[String]) -> Result<(), &'static str> {
    if allowed.iter().any(|a| a == location) {
        Ok(())
    } else {
        Err("Invalid location specified")
    }
}

// ============================================================================
// Account Validations
// ============================================================================

/// Validate a username (non-empty, no surrounding whitespace, sane length)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() || username.len() > 100 {
        return Err("Username must be between 1 and 100 characters");
    }
    if username.trim() != username {
        return Err("Username must not start or end with whitespace");
    }
    Ok(())
}

/// Validate a role string from a registration form
pub fn validate_role(role: &str) -> Result<Role, &'static str> {
    Role::parse(role).ok_or("Invalid role specified")
}

/// Validate a password meets the minimum length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

// ============================================================================
// Order Validations
// ============================================================================

/// Validate an order quantity is positive
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a price is not negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ikota_variants_normalize() {
        assert_eq!(normalize_location("Ikota Complex"), "Ikota");
        assert_eq!(normalize_location("  IKOTA shopping complex "), "Ikota");
        assert_eq!(normalize_location(" Ajah "), "Ajah");
    }

    #[test]
    fn unknown_location_rejected() {
        let allowed = vec!["Ikota".to_string(), "Ajah".to_string()];
        assert!(validate_location("Ajah", &allowed).is_ok());
        assert!(validate_location("Lekki", &allowed).is_err());
    }

    #[test]
    fn role_strings_validate() {
        assert_eq!(validate_role("baker"), Ok(Role::Baker));
        assert!(validate_role("owner").is_err());
    }

    #[test]
    fn quantity_and_price_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from(-1)).is_err());
    }
}
