//! # Field Validation
//!
//! Parsing for the free-text quantity and discount fields.
//!
//! ## Validation Strategy
//! ```text
//! UI quantity boxes hold raw strings ("", "2", "abc", ...)
//!      │
//!      ▼
//! parse_quantity / parse_discount  ← THIS MODULE
//!      │
//!      ├── blank → 0 (absence of a line, not an error)
//!      ├── numeric → value
//!      └── anything else → ValidationError, computation aborted,
//!          nothing persisted
//! ```
//!
//! Non-numeric input is reported to the caller, never silently coerced
//! to zero.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parses a quantity field for the given item.
///
/// Blank (or whitespace-only) parses as 0, which is equivalent to the
/// line being absent. Values ≤ 0 are accepted here and ignored by the
/// calculator.
pub fn parse_quantity(item_id: i64, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }

    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidQuantity {
            item_id,
            value: raw.to_string(),
        })
}

/// Parses the discount field: a flat currency amount, not a percentage.
///
/// Blank parses as 0.0. Non-numeric input is a validation failure and
/// no totals are produced.
pub fn parse_discount(raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }

    raw.parse::<f64>()
        .map_err(|_| ValidationError::InvalidDiscount {
            value: raw.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_quantity_is_zero() {
        assert_eq!(parse_quantity(1, "").unwrap(), 0);
        assert_eq!(parse_quantity(1, "   ").unwrap(), 0);
    }

    #[test]
    fn numeric_quantities_parse() {
        assert_eq!(parse_quantity(1, "2").unwrap(), 2);
        assert_eq!(parse_quantity(1, " 10 ").unwrap(), 10);
        assert_eq!(parse_quantity(1, "-3").unwrap(), -3);
    }

    #[test]
    fn non_numeric_quantity_is_an_error() {
        let err = parse_quantity(7, "abc").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidQuantity { item_id: 7, .. }
        ));
        assert!(parse_quantity(1, "2.5").is_err());
    }

    #[test]
    fn blank_discount_is_zero() {
        assert_eq!(parse_discount("").unwrap(), 0.0);
        assert_eq!(parse_discount("  ").unwrap(), 0.0);
    }

    #[test]
    fn numeric_discounts_parse() {
        assert_eq!(parse_discount("10").unwrap(), 10.0);
        assert_eq!(parse_discount("7.25").unwrap(), 7.25);
    }

    #[test]
    fn non_numeric_discount_is_an_error() {
        assert!(matches!(
            parse_discount("abc").unwrap_err(),
            ValidationError::InvalidDiscount { .. }
        ));
    }
}
