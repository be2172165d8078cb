//! # Order Session
//!
//! The in-flight state of one order and the bill calculator.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  OrderSession::new(catalog snapshot)                            │
//! │       │                                                         │
//! │       ├── set_quantity(item_id, "2")   (raw UI strings)         │
//! │       ├── set_discount("10")                                    │
//! │       ├── set_mode / set_payment_method                         │
//! │       │                                                         │
//! │       ├── calculate() ─► OrderTotals   (on demand, repeatable)  │
//! │       │                                                         │
//! │       └── lines() ─► resolved nonzero lines for submission      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is an explicit value object owned by the UI layer for
//! the duration of one order; there is no process-wide state. It holds
//! a catalog snapshot taken at creation, so an item deleted from the
//! catalog afterwards simply stops contributing (a defined tolerance,
//! not an error).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::{CoreError, ValidationError};
use crate::money::round2;
use crate::types::{MenuItem, OrderDraft, OrderMode, OrderTotals, PaymentMethod, ResolvedLine};
use crate::validation::{parse_discount, parse_quantity};

/// One order's worth of UI state: a catalog snapshot plus the raw
/// quantity and discount fields.
#[derive(Debug, Clone)]
pub struct OrderSession {
    catalog: Vec<MenuItem>,
    /// item id -> raw quantity field. BTreeMap keeps line iteration
    /// in ascending item id order, which makes output deterministic.
    quantities: BTreeMap<i64, String>,
    discount: String,
    mode: OrderMode,
    payment_method: PaymentMethod,
}

impl OrderSession {
    /// Starts a session over a snapshot of the current catalog.
    pub fn new(catalog: Vec<MenuItem>) -> Self {
        OrderSession {
            catalog,
            quantities: BTreeMap::new(),
            discount: String::new(),
            mode: OrderMode::default(),
            payment_method: PaymentMethod::default(),
        }
    }

    /// Stores the raw quantity field for an item. Parsing is deferred
    /// to [`calculate`](Self::calculate) so a typo surfaces exactly
    /// when totals are requested, as in the reference UI.
    pub fn set_quantity(&mut self, item_id: i64, raw: impl Into<String>) {
        self.quantities.insert(item_id, raw.into());
    }

    /// Stores the raw discount field (a flat currency amount).
    pub fn set_discount(&mut self, raw: impl Into<String>) {
        self.discount = raw.into();
    }

    pub fn set_mode(&mut self, mode: OrderMode) {
        self.mode = mode;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The catalog snapshot this session was opened with.
    pub fn catalog(&self) -> &[MenuItem] {
        &self.catalog
    }

    /// Case-insensitive substring filter over the snapshot, for the
    /// menu search box.
    pub fn filter_menu(&self, term: &str) -> Vec<&MenuItem> {
        let term = term.trim().to_lowercase();
        self.catalog
            .iter()
            .filter(|item| term.is_empty() || item.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Computes subtotal, tax, and final total from the current fields.
    ///
    /// ## Rules
    /// - a non-numeric quantity or discount aborts with a
    ///   [`ValidationError`] and no totals are produced
    /// - lines with quantity ≤ 0 are ignored
    /// - an item id absent from the snapshot contributes zero
    /// - the discount is applied once to the aggregate subtotal
    /// - accumulation keeps full floating precision; each aggregate is
    ///   rounded to 2 decimals only at the end
    pub fn calculate(&self) -> Result<OrderTotals, ValidationError> {
        let mut subtotal = 0.0_f64;
        let mut tax = 0.0_f64;

        for (&item_id, raw) in &self.quantities {
            let qty = parse_quantity(item_id, raw)?;
            if qty <= 0 {
                continue;
            }
            if let Some(item) = self.catalog.iter().find(|i| i.id == item_id) {
                let line_total = qty as f64 * item.price;
                subtotal += line_total;
                tax += line_total * item.tax_percent / 100.0;
            }
        }

        let discount = parse_discount(&self.discount)?;
        let final_total = subtotal - discount + tax;

        Ok(OrderTotals {
            subtotal: round2(subtotal),
            discount: round2(discount),
            tax: round2(tax),
            final_total: round2(final_total),
        })
    }

    /// Resolves the nonzero lines against the snapshot, freezing name
    /// and price for persistence and bill rendering.
    ///
    /// Lines whose item id has no catalog match are dropped, mirroring
    /// [`calculate`](Self::calculate).
    pub fn lines(&self) -> Result<Vec<ResolvedLine>, ValidationError> {
        let mut lines = Vec::new();
        for (&item_id, raw) in &self.quantities {
            let qty = parse_quantity(item_id, raw)?;
            if qty <= 0 {
                continue;
            }
            if let Some(item) = self.catalog.iter().find(|i| i.id == item_id) {
                lines.push(ResolvedLine {
                    item_id,
                    name: item.name.clone(),
                    unit_price: item.price,
                    quantity: qty,
                });
            }
        }
        Ok(lines)
    }

    /// Validates the session and freezes it into a submission payload.
    ///
    /// An order whose final total is not strictly positive is rejected
    /// here, before anything reaches the database.
    pub fn draft(&self, timestamp: NaiveDateTime) -> Result<OrderDraft, CoreError> {
        let totals = self.calculate()?;
        if totals.is_empty() {
            return Err(CoreError::EmptyOrder {
                final_total: totals.final_total,
            });
        }
        Ok(OrderDraft {
            timestamp,
            mode: self.mode,
            payment_method: self.payment_method,
            totals,
            lines: self.lines()?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: 1,
                name: "Burger".to_string(),
                category: "Food".to_string(),
                price: 120.0,
                image_path: None,
                tax_percent: 5.0,
            },
            MenuItem {
                id: 3,
                name: "Coke".to_string(),
                category: "Drink".to_string(),
                price: 50.0,
                image_path: None,
                tax_percent: 3.0,
            },
        ]
    }

    #[test]
    fn worked_example_from_the_bill_contract() {
        // Burger x2 + Coke x1, discount 10:
        // subtotal = 290, tax = 12 + 1.5, final = 290 - 10 + 13.5
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "2");
        session.set_quantity(3, "1");
        session.set_discount("10");

        let totals = session.calculate().unwrap();
        assert_eq!(totals.subtotal, 290.0);
        assert_eq!(totals.tax, 13.5);
        assert_eq!(totals.discount, 10.0);
        assert_eq!(totals.final_total, 293.5);
    }

    #[test]
    fn blank_and_zero_quantities_are_ignored() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "");
        session.set_quantity(3, "0");

        let totals = session.calculate().unwrap();
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.final_total, 0.0);
        assert!(totals.is_empty());
        assert!(session.lines().unwrap().is_empty());
    }

    #[test]
    fn negative_quantities_contribute_nothing() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "-2");
        let totals = session.calculate().unwrap();
        assert_eq!(totals.subtotal, 0.0);
    }

    #[test]
    fn non_numeric_quantity_aborts_with_no_totals() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "two");
        assert!(matches!(
            session.calculate().unwrap_err(),
            ValidationError::InvalidQuantity { item_id: 1, .. }
        ));
    }

    #[test]
    fn non_numeric_discount_aborts_with_no_totals() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "2");
        session.set_discount("abc");
        assert!(matches!(
            session.calculate().unwrap_err(),
            ValidationError::InvalidDiscount { .. }
        ));
    }

    #[test]
    fn unknown_item_id_is_skipped_not_rejected() {
        // Catalog entries can be deleted after the UI snapshot was
        // taken; such lines contribute zero.
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "1");
        session.set_quantity(99, "5");

        let totals = session.calculate().unwrap();
        assert_eq!(totals.subtotal, 120.0);

        let lines = session.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_id, 1);
    }

    #[test]
    fn discount_applies_once_to_the_aggregate() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "1");
        session.set_quantity(3, "1");
        session.set_discount("5");

        let totals = session.calculate().unwrap();
        // 170 - 5 + (6 + 1.5)
        assert_eq!(totals.final_total, 172.5);
    }

    #[test]
    fn lines_freeze_name_and_price_in_id_order() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(3, "1");
        session.set_quantity(1, "2");

        let lines = session.lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Burger");
        assert_eq!(lines[0].line_total(), 240.0);
        assert_eq!(lines[1].name, "Coke");
    }

    #[test]
    fn draft_freezes_a_valid_session() {
        let mut session = OrderSession::new(test_catalog());
        session.set_quantity(1, "2");
        session.set_quantity(3, "1");
        session.set_discount("10");
        session.set_mode(OrderMode::Takeaway);
        session.set_payment_method(PaymentMethod::Card);

        let when = chrono::NaiveDate::from_ymd_opt(2026, 8, 27)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let draft = session.draft(when).unwrap();
        assert_eq!(draft.mode, OrderMode::Takeaway);
        assert_eq!(draft.payment_method, PaymentMethod::Card);
        assert_eq!(draft.totals.final_total, 293.5);
        assert_eq!(draft.lines.len(), 2);
    }

    #[test]
    fn draft_rejects_an_empty_order() {
        let session = OrderSession::new(test_catalog());
        let when = chrono::NaiveDate::from_ymd_opt(2026, 8, 27)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert!(matches!(
            session.draft(when).unwrap_err(),
            CoreError::EmptyOrder { .. }
        ));
    }

    #[test]
    fn menu_filter_is_case_insensitive() {
        let session = OrderSession::new(test_catalog());
        assert_eq!(session.filter_menu("bur").len(), 1);
        assert_eq!(session.filter_menu("BUR").len(), 1);
        assert_eq!(session.filter_menu("").len(), 2);
        assert!(session.filter_menu("pizza").is_empty());
    }
}
