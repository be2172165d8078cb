//! # Domain Types
//!
//! Core domain types used throughout Rasoi POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  MenuItem          catalog entry; immutable during one order    │
//! │  OrderTotals       subtotal / discount / tax / final_total      │
//! │  Order             persisted, append-only, invoice-numbered     │
//! │  OrderLine         (item_id, quantity) pair within one order    │
//! │  Payment           one per order: method + amount               │
//! │  OrderMode         Dine-In | Takeaway                           │
//! │  PaymentMethod     Cash | Card | UPI                            │
//! │  Role/AuthOutcome  typed access-gate result                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Monetary values are `f64` rupees. Accumulation keeps full floating
//! precision; rounding to 2 decimals happens once per total, in the
//! calculator, so persisted totals match the reference system.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Menu Item
// =============================================================================

/// A catalog entry: something the restaurant sells.
///
/// Created and updated only by catalog seeding; read by the calculator
/// and the UI. Treated as immutable for the lifetime of one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable catalog id (also the database primary key).
    pub id: i64,

    /// Display name shown on the menu and on bills.
    pub name: String,

    /// Menu section, e.g. "Indian", "Drink", "Dessert".
    pub category: String,

    /// Unit price in rupees; non-negative.
    pub price: f64,

    /// Optional image file name for the UI.
    pub image_path: Option<String>,

    /// Tax rate as a percentage, 0-100.
    pub tax_percent: f64,
}

// =============================================================================
// Order Mode
// =============================================================================

/// How the order is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderMode {
    #[default]
    #[serde(rename = "Dine-In")]
    DineIn,
    Takeaway,
}

impl OrderMode {
    /// Stable string form, as stored in the `orders.mode` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderMode::DineIn => "Dine-In",
            OrderMode::Takeaway => "Takeaway",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dine-In" | "dine-in" => Ok(OrderMode::DineIn),
            "Takeaway" | "takeaway" => Ok(OrderMode::Takeaway),
            other => Err(format!("unknown order mode '{other}'")),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    /// Stable string form, as stored in `payments.payment_method`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" | "cash" => Ok(PaymentMethod::Cash),
            "Card" | "card" => Ok(PaymentMethod::Card),
            "UPI" | "upi" => Ok(PaymentMethod::Upi),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The four figures of one bill, each rounded to 2 decimals.
///
/// Invariant: `final_total = subtotal - discount + tax`, where subtotal
/// and tax are summed only over lines with quantity > 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub final_total: f64,
}

impl OrderTotals {
    /// True when this order would be rejected at submission
    /// (`final_total` not strictly positive).
    pub fn is_empty(&self) -> bool {
        self.final_total <= 0.0
    }
}

// =============================================================================
// Order / Lines / Payment
// =============================================================================

/// A persisted, finalized order. Created exactly once at submission,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Database id, assigned on persist.
    pub id: i64,

    pub timestamp: NaiveDateTime,

    pub mode: OrderMode,

    pub totals: OrderTotals,

    /// `ORD-<year>-<id zero-padded to 4>`; stamped inside the same
    /// transaction that inserts the row, once the id is known.
    pub invoice_number: Option<String>,
}

/// A (menu item, quantity) pair within one order, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: i64,
    pub quantity: i64,
}

/// A quantity line resolved against the catalog snapshot, carrying the
/// name and price frozen at calculation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub item_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl ResolvedLine {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Everything the ledger needs to persist one order atomically.
///
/// Produced by [`OrderSession::draft`](crate::OrderSession::draft) once
/// totals validate; a draft always has a strictly positive final total.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub timestamp: NaiveDateTime,
    pub mode: OrderMode,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
    /// Nonzero lines resolved against the catalog snapshot.
    pub lines: Vec<ResolvedLine>,
}

/// The payment recorded with an order; one per order in this model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: i64,
    pub method: PaymentMethod,
    pub amount_paid: f64,
}

// =============================================================================
// Access Gate Types
// =============================================================================

/// Credential roles recognized by the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cashier,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "cashier" => Ok(Role::Cashier),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Typed result of a credential lookup. The gate never reports which
/// field mismatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized { role: Role },
    Denied,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_mode_round_trips_through_strings() {
        for mode in [OrderMode::DineIn, OrderMode::Takeaway] {
            assert_eq!(mode.as_str().parse::<OrderMode>().unwrap(), mode);
        }
        assert!("Delivery".parse::<OrderMode>().is_err());
    }

    #[test]
    fn payment_method_round_trips_through_strings() {
        for method in [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Upi] {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!("Cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn totals_emptiness() {
        assert!(OrderTotals::default().is_empty());
        let totals = OrderTotals {
            subtotal: 290.0,
            discount: 10.0,
            tax: 13.5,
            final_total: 293.5,
        };
        assert!(!totals.is_empty());
        // A discount larger than the bill still counts as empty.
        let overdiscounted = OrderTotals {
            subtotal: 50.0,
            discount: 60.0,
            tax: 1.5,
            final_total: -8.5,
        };
        assert!(overdiscounted.is_empty());
    }

    #[test]
    fn resolved_line_total() {
        let line = ResolvedLine {
            item_id: 1,
            name: "Burger".to_string(),
            unit_price: 120.0,
            quantity: 2,
        };
        assert_eq!(line.line_total(), 240.0);
    }

    #[test]
    fn role_parsing_is_case_sensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("Admin".parse::<Role>().is_err());
    }
}
