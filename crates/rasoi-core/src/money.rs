//! # Money Helpers
//!
//! Rounding and currency formatting for monetary values.
//!
//! ## Why f64 and sum-then-round?
//! The reference system accumulates line totals and tax in full
//! floating precision and rounds each aggregate once, at the end.
//! Rounding per line and then summing drifts from the reference
//! totals, so every aggregate in this codebase is built raw and passed
//! through [`round2`] exactly once before display or persistence.

use std::fmt;

/// Currency symbol used on bills and reports.
pub const CURRENCY: &str = "₹";

/// Rounds to 2 decimal places, half away from zero.
///
/// Applied once per aggregate (subtotal, tax, final total), never per
/// line.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount with the currency symbol and 2 decimals,
/// e.g. `₹293.50`.
pub fn format_amount(value: f64) -> String {
    format!("{CURRENCY}{value:.2}")
}

/// `Display` adapter for amounts, for use in `format!` chains.
pub struct Amount(pub f64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY}{:.2}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(13.499999999999998), 13.5);
        assert_eq!(round2(293.5050001), 293.51);
        assert_eq!(round2(-8.5050001), -8.51);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn sum_then_round_matches_reference() {
        // 2 x 120 at 5% + 1 x 50 at 3% = 12 + 1.5 tax, accumulated raw.
        let tax = 2.0 * 120.0 * 0.05 + 1.0 * 50.0 * 0.03;
        assert_eq!(round2(tax), 13.5);
    }

    #[test]
    fn formats_with_currency_symbol() {
        assert_eq!(format_amount(293.5), "₹293.50");
        assert_eq!(format_amount(0.0), "₹0.00");
        assert_eq!(Amount(120.0).to_string(), "₹120.00");
    }
}
