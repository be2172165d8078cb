//! # Order Ledger
//!
//! Atomic persistence of finalized orders.
//!
//! ## Submission Sequence (one transaction)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  submit(draft)                                                  │
//! │     │                                                           │
//! │     ├── reject if final_total ≤ 0 (no write happens)            │
//! │     │                                                           │
//! │     ▼  BEGIN                                                    │
//! │     ├── INSERT orders (invoice_number NULL)                     │
//! │     ├── id := last_insert_rowid()                               │
//! │     ├── UPDATE orders SET invoice_number = 'ORD-<year>-<id:04>' │
//! │     ├── INSERT order_items (one per nonzero line)               │
//! │     ├── INSERT payments (amount_paid = final_total)             │
//! │     ▼  COMMIT                                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any failure mid-sequence rolls the whole order back; the ledger
//! never exposes an order without its invoice number, lines, or
//! payment. Orders are append-only: there is no update or delete path.

use chrono::{Datelike, NaiveDateTime};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbResult, LedgerError, PersistenceError};
use rasoi_core::{
    BillDocument, Order, OrderDraft, OrderLine, OrderTotals, Payment, ResolvedLine,
    TIMESTAMP_FORMAT,
};

/// Row shape for `orders`. The `total` column holds the pre-discount
/// subtotal (historical schema naming, preserved).
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    timestamp: String,
    mode: String,
    total: f64,
    discount: f64,
    tax: f64,
    final_total: f64,
    invoice_number: Option<String>,
}

impl OrderRow {
    fn into_order(self) -> DbResult<Order> {
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| {
                PersistenceError::Corrupt(format!("orders.timestamp '{}': {e}", self.timestamp))
            })?;
        let mode = self.mode.parse().map_err(PersistenceError::Corrupt)?;

        Ok(Order {
            id: self.id,
            timestamp,
            mode,
            totals: OrderTotals {
                subtotal: self.total,
                discount: self.discount,
                tax: self.tax,
                final_total: self.final_total,
            },
            invoice_number: self.invoice_number,
        })
    }
}

/// Repository for order persistence and reads.
#[derive(Debug, Clone)]
pub struct OrderLedger {
    pool: SqlitePool,
}

impl OrderLedger {
    /// Creates a new OrderLedger.
    pub fn new(pool: SqlitePool) -> Self {
        OrderLedger { pool }
    }

    /// Persists a finalized order atomically and returns it with its
    /// assigned id and invoice number.
    ///
    /// The invoice number needs the generated row id, so the row is
    /// inserted with a NULL invoice and stamped by an UPDATE inside
    /// the same transaction; no reader ever observes the NULL.
    pub async fn submit(&self, draft: &OrderDraft) -> Result<Order, LedgerError> {
        if draft.totals.is_empty() {
            debug!(
                final_total = draft.totals.final_total,
                "Rejecting empty order"
            );
            return Err(LedgerError::EmptyOrder {
                final_total: draft.totals.final_total,
            });
        }

        let timestamp = draft.timestamp.format(TIMESTAMP_FORMAT).to_string();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (timestamp, mode, total, discount, tax, final_total, invoice_number)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL)
            "#,
        )
        .bind(&timestamp)
        .bind(draft.mode.as_str())
        .bind(draft.totals.subtotal)
        .bind(draft.totals.discount)
        .bind(draft.totals.tax)
        .bind(draft.totals.final_total)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();
        let invoice_number = format!("ORD-{}-{:04}", draft.timestamp.year(), order_id);

        sqlx::query("UPDATE orders SET invoice_number = ?1 WHERE id = ?2")
            .bind(&invoice_number)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        for line in &draft.lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, quantity)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(order_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO payments (order_id, payment_method, amount_paid)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(order_id)
        .bind(draft.payment_method.as_str())
        .bind(draft.totals.final_total)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            order_id,
            invoice_number = %invoice_number,
            final_total = draft.totals.final_total,
            "Order persisted"
        );

        Ok(Order {
            id: order_id,
            timestamp: draft.timestamp,
            mode: draft.mode,
            totals: draft.totals,
            invoice_number: Some(invoice_number),
        })
    }

    /// Gets an order by id.
    pub async fn get_order(&self, id: i64) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, timestamp, mode, total, discount, tax, final_total, invoice_number
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Gets the persisted lines of an order, in insertion order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT item_id, quantity
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(item_id, quantity)| OrderLine { item_id, quantity })
            .collect())
    }

    /// Gets the payment recorded with an order.
    pub async fn get_payment(&self, order_id: i64) -> DbResult<Option<Payment>> {
        let row: Option<(String, f64)> = sqlx::query_as(
            r#"
            SELECT payment_method, amount_paid
            FROM payments
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(method, amount_paid)| {
            let method = method.parse().map_err(PersistenceError::Corrupt)?;
            Ok(Payment {
                order_id,
                method,
                amount_paid,
            })
        })
        .transpose()
    }

    /// Reconstructs the bill document for a persisted order.
    ///
    /// Lines are joined back to the catalog for names and current
    /// prices; a line whose item has since been deleted is dropped,
    /// matching the calculator's tolerance.
    pub async fn load_bill(
        &self,
        order_id: i64,
        generated_at: NaiveDateTime,
    ) -> DbResult<Option<BillDocument>> {
        let Some(order) = self.get_order(order_id).await? else {
            return Ok(None);
        };

        let rows: Vec<(i64, String, f64, i64)> = sqlx::query_as(
            r#"
            SELECT oi.item_id, mi.name, mi.price, oi.quantity
            FROM order_items oi
            JOIN menu_items mi ON mi.id = oi.item_id
            WHERE oi.order_id = ?1
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let lines: Vec<ResolvedLine> = rows
            .into_iter()
            .map(|(item_id, name, unit_price, quantity)| ResolvedLine {
                item_id,
                name,
                unit_price,
                quantity,
            })
            .collect();

        Ok(Some(BillDocument::assemble(&order, &lines, generated_at)))
    }

    /// Number of persisted orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
