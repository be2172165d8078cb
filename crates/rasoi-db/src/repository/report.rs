//! # Report Repository
//!
//! Sales aggregation over a period window.
//!
//! A report is always recomputed from the order rows at request time;
//! the `reports` table is an append-only audit log of invocations and
//! is never read back to answer a later query. Period boundary math
//! and tie-breaking live in rasoi-core; this module only runs the
//! aggregation SQL.
//!
//! Timestamps are TEXT in a fixed format, so the window predicate is a
//! plain string comparison: `timestamp >= '<boundary>'`.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use rasoi_core::report::{rank_top_items, ReportPeriod, SalesReport, TopItem};
use rasoi_core::TIMESTAMP_FORMAT;

/// Repository for sales report aggregation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes the sales report for the period containing `now`.
    ///
    /// Includes every order with `timestamp >= period start`; a window
    /// with no orders yields zeros and an empty ranking rather than an
    /// error.
    pub async fn sales_summary(
        &self,
        period: ReportPeriod,
        now: NaiveDateTime,
    ) -> DbResult<SalesReport> {
        let start = period.start(now);
        let boundary = start.format(TIMESTAMP_FORMAT).to_string();

        debug!(period = %period, boundary = %boundary, "Computing sales report");

        let (total_orders, total_sales, total_tax): (i64, f64, f64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(final_total), 0.0),
                   COALESCE(SUM(tax), 0.0)
            FROM orders
            WHERE timestamp >= ?1
            "#,
        )
        .bind(&boundary)
        .fetch_one(&self.pool)
        .await?;

        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            r#"
            SELECT oi.item_id, mi.name, SUM(oi.quantity)
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN menu_items mi ON mi.id = oi.item_id
            WHERE o.timestamp >= ?1
            GROUP BY oi.item_id, mi.name
            "#,
        )
        .bind(&boundary)
        .fetch_all(&self.pool)
        .await?;

        let top_items = rank_top_items(
            rows.into_iter()
                .map(|(item_id, name, quantity)| TopItem {
                    item_id,
                    name,
                    quantity,
                })
                .collect(),
        );

        Ok(SalesReport {
            period,
            start: start.date(),
            total_orders,
            total_sales,
            total_tax,
            top_items,
        })
    }

    /// Appends one audit row for a report invocation.
    pub async fn log_snapshot(
        &self,
        report: &SalesReport,
        generated_on: NaiveDateTime,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reports (generated_on, period, total_orders, total_sales, total_tax)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(generated_on.format(TIMESTAMP_FORMAT).to_string())
        .bind(report.period.as_str())
        .bind(report.total_orders)
        .bind(report.total_sales)
        .bind(report.total_tax)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of audit rows logged so far.
    pub async fn snapshot_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use rasoi_core::{
        MenuItem, OrderDraft, OrderMode, OrderTotals, PaymentMethod, ResolvedLine,
    };

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        for (id, name, price, tax) in [
            (1, "Burger", 120.0, 5.0),
            (2, "Pizza", 250.0, 7.0),
            (3, "Coke", 50.0, 3.0),
        ] {
            catalog
                .upsert(&MenuItem {
                    id,
                    name: name.to_string(),
                    category: "Food".to_string(),
                    price,
                    image_path: None,
                    tax_percent: tax,
                })
                .await
                .unwrap();
        }
        db
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn draft(timestamp: NaiveDateTime, lines: Vec<(i64, &str, f64, i64)>) -> OrderDraft {
        let subtotal: f64 = lines
            .iter()
            .map(|(_, _, price, qty)| *qty as f64 * price)
            .sum();
        OrderDraft {
            timestamp,
            mode: OrderMode::DineIn,
            payment_method: PaymentMethod::Cash,
            totals: OrderTotals {
                subtotal,
                discount: 0.0,
                tax: 10.0,
                final_total: subtotal + 10.0,
            },
            lines: lines
                .into_iter()
                .map(|(item_id, name, unit_price, quantity)| ResolvedLine {
                    item_id,
                    name: name.to_string(),
                    unit_price,
                    quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn empty_window_yields_zeros_not_an_error() {
        let db = test_db().await;
        let report = db
            .reports()
            .sales_summary(ReportPeriod::Day, at(2026, 8, 27, 15))
            .await
            .unwrap();

        assert_eq!(report.total_orders, 0);
        assert_eq!(report.total_sales, 0.0);
        assert_eq!(report.total_tax, 0.0);
        assert!(report.top_items.is_empty());
    }

    #[tokio::test]
    async fn day_window_excludes_yesterday() {
        let db = test_db().await;
        let ledger = db.ledger();

        ledger
            .submit(&draft(at(2026, 8, 26, 23), vec![(1, "Burger", 120.0, 1)]))
            .await
            .unwrap();
        ledger
            .submit(&draft(at(2026, 8, 27, 9), vec![(2, "Pizza", 250.0, 2)]))
            .await
            .unwrap();

        let report = db
            .reports()
            .sales_summary(ReportPeriod::Day, at(2026, 8, 27, 15))
            .await
            .unwrap();

        assert_eq!(report.total_orders, 1);
        assert_eq!(report.total_sales, 510.0);
        assert_eq!(report.top_items.len(), 1);
        assert_eq!(report.top_items[0].name, "Pizza");
    }

    #[tokio::test]
    async fn week_window_starts_monday() {
        let db = test_db().await;
        let ledger = db.ledger();

        // 2026-08-27 is a Thursday; Sunday the 23rd is out, Monday the
        // 24th is in.
        ledger
            .submit(&draft(at(2026, 8, 23, 12), vec![(1, "Burger", 120.0, 1)]))
            .await
            .unwrap();
        ledger
            .submit(&draft(at(2026, 8, 24, 0), vec![(3, "Coke", 50.0, 4)]))
            .await
            .unwrap();

        let report = db
            .reports()
            .sales_summary(ReportPeriod::Week, at(2026, 8, 27, 15))
            .await
            .unwrap();

        assert_eq!(report.total_orders, 1);
        assert_eq!(report.top_items[0].item_id, 3);
    }

    #[tokio::test]
    async fn ranking_sums_across_orders_and_breaks_ties_by_id() {
        let db = test_db().await;
        let ledger = db.ledger();
        let when = at(2026, 8, 27, 10);

        ledger
            .submit(&draft(
                when,
                vec![(1, "Burger", 120.0, 2), (3, "Coke", 50.0, 3)],
            ))
            .await
            .unwrap();
        ledger
            .submit(&draft(
                when,
                vec![(2, "Pizza", 250.0, 3), (1, "Burger", 120.0, 1)],
            ))
            .await
            .unwrap();

        let report = db
            .reports()
            .sales_summary(ReportPeriod::Day, at(2026, 8, 27, 15))
            .await
            .unwrap();

        // Burger and Coke and Pizza all total 3; ascending id wins.
        let ids: Vec<i64> = report.top_items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn snapshots_append_only() {
        let db = test_db().await;
        let reports = db.reports();

        let report = reports
            .sales_summary(ReportPeriod::Day, at(2026, 8, 27, 15))
            .await
            .unwrap();
        reports
            .log_snapshot(&report, at(2026, 8, 27, 15))
            .await
            .unwrap();
        reports
            .log_snapshot(&report, at(2026, 8, 27, 16))
            .await
            .unwrap();

        assert_eq!(reports.snapshot_count().await.unwrap(), 2);
    }
}
