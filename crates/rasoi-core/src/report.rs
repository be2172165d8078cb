//! # Sales Reports
//!
//! Period boundaries, top-seller ranking, and the report CSV export.
//!
//! Reports are always recomputed from the order rows; the optional
//! `reports` audit table is append-only and never read back. The SQL
//! aggregation lives in rasoi-db; the pure parts — where a period
//! starts and how ties rank — live here.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::TOP_ITEMS_LIMIT;

// =============================================================================
// Report Period
// =============================================================================

/// The reporting window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
}

impl ReportPeriod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
        }
    }

    /// The start-of-period boundary for a report taken at `now`:
    /// day → midnight today, week → midnight on the most recent
    /// Monday, month → midnight on the 1st of the current month.
    /// Orders with `timestamp >= boundary` qualify.
    pub fn start(&self, now: NaiveDateTime) -> NaiveDateTime {
        let date = match self {
            ReportPeriod::Day => now.date(),
            ReportPeriod::Week => {
                let back = now.weekday().num_days_from_monday() as i64;
                now.date() - chrono::Duration::days(back)
            }
            ReportPeriod::Month => now.date().with_day(1).unwrap_or_else(|| now.date()),
        };
        date.and_time(NaiveTime::MIN)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(ReportPeriod::Day),
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            other => Err(format!("unknown report period '{other}'")),
        }
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// One entry in the top-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub item_id: i64,
    pub name: String,
    pub quantity: i64,
}

/// A computed sales report over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub period: ReportPeriod,
    /// First day of the window (midnight boundary's date).
    pub start: NaiveDate,
    pub total_orders: i64,
    pub total_sales: f64,
    pub total_tax: f64,
    pub top_items: Vec<TopItem>,
}

/// An append-only audit record of one report invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub generated_on: NaiveDateTime,
    pub period: ReportPeriod,
    pub total_orders: i64,
    pub total_sales: f64,
    pub total_tax: f64,
}

// =============================================================================
// Ranking
// =============================================================================

/// Orders the ranking: descending total quantity, ties broken by
/// ascending item id, truncated to the top 5. This makes the ranking
/// deterministic regardless of how the rows arrived.
pub fn rank_top_items(mut items: Vec<TopItem>) -> Vec<TopItem> {
    items.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    items.truncate(TOP_ITEMS_LIMIT);
    items
}

// =============================================================================
// Tabular Export
// =============================================================================

/// Serializes a report to CSV, mirroring the dashboard export layout.
pub fn report_to_csv(report: &SalesReport) -> Result<String, crate::RenderError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(["Sales Report"])?;
    wtr.write_record(["Period", report.period.as_str()])?;
    wtr.write_record(["Start Date", &report.start.to_string()])?;
    wtr.write_record(["Total Orders", &report.total_orders.to_string()])?;
    wtr.write_record(["Total Sales", &format!("{:.2}", report.total_sales)])?;
    wtr.write_record(["Total Tax", &format!("{:.2}", report.total_tax)])?;
    wtr.write_record([""])?;
    wtr.write_record(["Most Sold Items"])?;
    wtr.write_record(["Item", "Quantity"])?;
    for item in &report.top_items {
        wtr.write_record([item.name.as_str(), &item.quantity.to_string()])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| crate::RenderError::Malformed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::RenderError::Malformed(e.to_string()))
}

/// `sales_report_<period>_<start date>.csv`
pub fn report_csv_filename(report: &SalesReport) -> String {
    format!("sales_report_{}_{}.csv", report.period, report.start)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn day_boundary_is_midnight_today() {
        let now = at(2026, 8, 27, 15, 42);
        assert_eq!(ReportPeriod::Day.start(now), at(2026, 8, 27, 0, 0));
    }

    #[test]
    fn week_boundary_is_most_recent_monday() {
        // 2026-08-27 is a Thursday; the week started Monday the 24th.
        let now = at(2026, 8, 27, 15, 42);
        assert_eq!(ReportPeriod::Week.start(now), at(2026, 8, 24, 0, 0));

        // A Monday maps to itself at midnight.
        let monday = at(2026, 8, 24, 9, 0);
        assert_eq!(ReportPeriod::Week.start(monday), at(2026, 8, 24, 0, 0));
    }

    #[test]
    fn week_boundary_crosses_month_edges() {
        // 2026-09-01 is a Tuesday; the week started Monday 08-31.
        let now = at(2026, 9, 1, 8, 0);
        assert_eq!(ReportPeriod::Week.start(now), at(2026, 8, 31, 0, 0));
    }

    #[test]
    fn month_boundary_is_the_first() {
        let now = at(2026, 8, 27, 15, 42);
        assert_eq!(ReportPeriod::Month.start(now), at(2026, 8, 1, 0, 0));
    }

    #[test]
    fn ranking_is_deterministic_on_ties() {
        let items = vec![
            TopItem { item_id: 9, name: "Coke".into(), quantity: 4 },
            TopItem { item_id: 2, name: "Pizza".into(), quantity: 4 },
            TopItem { item_id: 5, name: "Fries".into(), quantity: 7 },
        ];
        let ranked = rank_top_items(items);
        assert_eq!(
            ranked.iter().map(|i| i.item_id).collect::<Vec<_>>(),
            vec![5, 2, 9]
        );
    }

    #[test]
    fn ranking_truncates_to_five() {
        let items = (1..=8)
            .map(|id| TopItem {
                item_id: id,
                name: format!("Item {id}"),
                quantity: 100 - id,
            })
            .collect();
        let ranked = rank_top_items(items);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].item_id, 1);
    }

    #[test]
    fn period_strings_round_trip() {
        for period in [ReportPeriod::Day, ReportPeriod::Week, ReportPeriod::Month] {
            assert_eq!(period.as_str().parse::<ReportPeriod>().unwrap(), period);
        }
        assert!("year".parse::<ReportPeriod>().is_err());
    }

    #[test]
    fn report_csv_layout() {
        let report = SalesReport {
            period: ReportPeriod::Day,
            start: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
            total_orders: 2,
            total_sales: 500.0,
            total_tax: 22.5,
            top_items: vec![TopItem {
                item_id: 1,
                name: "Burger".into(),
                quantity: 3,
            }],
        };
        let data = report_to_csv(&report).unwrap();
        assert!(data.starts_with("Sales Report\n"));
        assert!(data.contains("Period,day"));
        assert!(data.contains("Total Sales,500.00"));
        assert!(data.contains("Burger,3"));
        assert_eq!(
            report_csv_filename(&report),
            "sales_report_day_2026-08-27.csv"
        );
    }
}
