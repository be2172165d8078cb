//! # Bill Documents
//!
//! Rendering of a finalized order into the three bill formats.
//!
//! ## Formats
//! ```text
//! BillDocument (invoice number + frozen lines + totals)
//!      │
//!      ├── PrintRenderer::render  print-style document, requires the
//!      │                          configured font resource; fails with
//!      │                          RenderError::FontMissing otherwise
//!      ├── render_preview         plain-text fallback, no resources
//!      ├── bill_to_csv            tabular export (Item,Qty,Price,Total)
//!      └── bill_to_json           structured export + generation time
//! ```
//!
//! Everything here is a function of the document's fields; there is no
//! database access. Exports round-trip: `parse_bill_csv` and
//! `bill_from_json` recover the same names, quantities, prices, and
//! footer totals that produced them.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::money::format_amount;
use crate::types::{Order, OrderTotals, ResolvedLine};
use crate::{BILL_DATE_FORMAT, STORE_NAME};

const RULE: &str = "----------------------------------------";

// =============================================================================
// Bill Document
// =============================================================================

/// One rendered line on a bill: `line_total = quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl BillLine {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Everything the document generator needs about one finalized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDocument {
    pub order_id: i64,
    pub invoice_number: String,
    /// When the document was generated (not the order timestamp).
    pub generated_at: NaiveDateTime,
    pub lines: Vec<BillLine>,
    pub totals: OrderTotals,
}

impl BillDocument {
    /// Builds the document for a persisted order from its resolved
    /// lines. A persisted order always carries an invoice number; a
    /// missing one renders as empty rather than failing the bill.
    pub fn assemble(order: &Order, lines: &[ResolvedLine], generated_at: NaiveDateTime) -> Self {
        BillDocument {
            order_id: order.id,
            invoice_number: order.invoice_number.clone().unwrap_or_default(),
            generated_at,
            lines: lines
                .iter()
                .map(|line| BillLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            totals: order.totals,
        }
    }
}

// =============================================================================
// Print-Style Document
// =============================================================================

/// Renders the print-style bill.
///
/// Construction loads the font resource the print pipeline embeds;
/// a missing font is an explicit failure rather than a silently
/// degraded document. Callers fall back to [`render_preview`] when
/// loading fails.
#[derive(Debug, Clone)]
pub struct PrintRenderer {
    font_path: PathBuf,
}

impl PrintRenderer {
    /// Loads the renderer's font resource.
    pub fn load(font_path: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let font_path = font_path.into();
        if !font_path.is_file() {
            return Err(RenderError::FontMissing { path: font_path });
        }
        Ok(PrintRenderer { font_path })
    }

    /// The font this renderer was loaded with.
    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Renders the printable bill document.
    pub fn render(&self, doc: &BillDocument) -> String {
        layout_bill(doc)
    }
}

/// Plain-text on-screen preview; identical layout, no font required.
pub fn render_preview(doc: &BillDocument) -> String {
    layout_bill(doc)
}

fn layout_bill(doc: &BillDocument) -> String {
    let mut out = String::new();
    out.push_str(&format!("{STORE_NAME:^40}\n"));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Invoice #: {}\n", doc.invoice_number));
    out.push_str(&format!(
        "Date: {}\n",
        doc.generated_at.format(BILL_DATE_FORMAT)
    ));
    out.push_str(RULE);
    out.push('\n');

    for line in &doc.lines {
        let price = format_amount(line.unit_price);
        let total = format_amount(line.line_total());
        out.push_str(&format!(
            "{:<22} x{:<3} {:<9} = {}\n",
            line.name, line.quantity, price, total
        ));
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Subtotal:    {}\n", format_amount(doc.totals.subtotal)));
    out.push_str(&format!("Discount:    {}\n", format_amount(doc.totals.discount)));
    out.push_str(&format!("Tax:         {}\n", format_amount(doc.totals.tax)));
    out.push_str(&format!(
        "Final Total: {}\n",
        format_amount(doc.totals.final_total)
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Thank You! Visit Again...\n");
    out
}

// =============================================================================
// Tabular Export (CSV)
// =============================================================================

/// Serializes a bill to CSV: one row per line, a blank row, then the
/// footer figures.
pub fn bill_to_csv(doc: &BillDocument) -> Result<String, RenderError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(["Item", "Quantity", "Price", "Total"])?;
    for line in &doc.lines {
        wtr.write_record([
            line.name.as_str(),
            &line.quantity.to_string(),
            &format!("{:.2}", line.unit_price),
            &format!("{:.2}", line.line_total()),
        ])?;
    }
    wtr.write_record([""])?;
    wtr.write_record(["Subtotal", &format!("{:.2}", doc.totals.subtotal)])?;
    wtr.write_record(["Discount", &format!("{:.2}", doc.totals.discount)])?;
    wtr.write_record(["Tax", &format!("{:.2}", doc.totals.tax)])?;
    wtr.write_record(["Final Total", &format!("{:.2}", doc.totals.final_total)])?;

    let bytes = wtr
        .into_inner()
        .map_err(|e| RenderError::Malformed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RenderError::Malformed(e.to_string()))
}

/// Re-parses a tabular export back into lines and totals.
pub fn parse_bill_csv(data: &str) -> Result<(Vec<BillLine>, OrderTotals), RenderError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(data.as_bytes());

    let mut lines = Vec::new();
    let mut totals = OrderTotals::default();
    let mut in_footer = false;

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        if idx == 0 {
            // Header row.
            continue;
        }
        let first = record.get(0).unwrap_or("");
        if first.is_empty() {
            in_footer = true;
            continue;
        }

        if in_footer {
            let value: f64 = record
                .get(1)
                .unwrap_or("")
                .parse()
                .map_err(|_| RenderError::Malformed(format!("bad footer row '{first}'")))?;
            match first {
                "Subtotal" => totals.subtotal = value,
                "Discount" => totals.discount = value,
                "Tax" => totals.tax = value,
                "Final Total" => totals.final_total = value,
                other => {
                    return Err(RenderError::Malformed(format!(
                        "unexpected footer label '{other}'"
                    )))
                }
            }
        } else {
            let quantity: i64 = record
                .get(1)
                .unwrap_or("")
                .parse()
                .map_err(|_| RenderError::Malformed(format!("bad quantity for '{first}'")))?;
            let unit_price: f64 = record
                .get(2)
                .unwrap_or("")
                .parse()
                .map_err(|_| RenderError::Malformed(format!("bad price for '{first}'")))?;
            lines.push(BillLine {
                name: first.to_string(),
                quantity,
                unit_price,
            });
        }
    }

    Ok((lines, totals))
}

// =============================================================================
// Structured Export (JSON)
// =============================================================================

/// Serializes a bill to the structured export, including the
/// generation timestamp.
pub fn bill_to_json(doc: &BillDocument) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Re-parses a structured export.
pub fn bill_from_json(data: &str) -> Result<BillDocument, RenderError> {
    Ok(serde_json::from_str(data)?)
}

// =============================================================================
// Export File Names
// =============================================================================

/// `bill_<invoice>.txt` — the print-style document.
pub fn print_filename(invoice_number: &str) -> String {
    format!("bill_{invoice_number}.txt")
}

/// `bill_order_<id>.csv` — the tabular export.
pub fn csv_filename(order_id: i64) -> String {
    format!("bill_order_{order_id}.csv")
}

/// `bill_order_<id>.json` — the structured export.
pub fn json_filename(order_id: i64) -> String {
    format!("bill_order_{order_id}.json")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_doc() -> BillDocument {
        BillDocument {
            order_id: 7,
            invoice_number: "ORD-2026-0007".to_string(),
            generated_at: NaiveDate::from_ymd_opt(2026, 8, 27)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
            lines: vec![
                BillLine {
                    name: "Burger".to_string(),
                    quantity: 2,
                    unit_price: 120.0,
                },
                BillLine {
                    name: "Coke".to_string(),
                    quantity: 1,
                    unit_price: 50.0,
                },
            ],
            totals: OrderTotals {
                subtotal: 290.0,
                discount: 10.0,
                tax: 13.5,
                final_total: 293.5,
            },
        }
    }

    #[test]
    fn print_renderer_requires_the_font() {
        let err = PrintRenderer::load("/nonexistent/DejaVuSans.ttf").unwrap_err();
        assert!(matches!(err, RenderError::FontMissing { .. }));
    }

    #[test]
    fn print_renderer_loads_an_existing_font() {
        let path = std::env::temp_dir().join("rasoi_test_font.ttf");
        std::fs::write(&path, b"fake font bytes").unwrap();
        let renderer = PrintRenderer::load(&path).unwrap();
        let rendered = renderer.render(&test_doc());
        assert!(rendered.contains("Invoice #: ORD-2026-0007"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn preview_contains_lines_and_footer() {
        let text = render_preview(&test_doc());
        assert!(text.contains("RASOI RESTAURANT"));
        assert!(text.contains("Burger"));
        assert!(text.contains("= ₹240.00"));
        assert!(text.contains("Subtotal:    ₹290.00"));
        assert!(text.contains("Discount:    ₹10.00"));
        assert!(text.contains("Tax:         ₹13.50"));
        assert!(text.contains("Final Total: ₹293.50"));
        assert!(text.contains("Thank You! Visit Again..."));
    }

    #[test]
    fn csv_round_trip_preserves_lines_and_totals() {
        let doc = test_doc();
        let data = bill_to_csv(&doc).unwrap();
        assert!(data.starts_with("Item,Quantity,Price,Total"));

        let (lines, totals) = parse_bill_csv(&data).unwrap();
        assert_eq!(lines, doc.lines);
        assert_eq!(totals, doc.totals);
    }

    #[test]
    fn json_round_trip_preserves_the_document() {
        let doc = test_doc();
        let data = bill_to_json(&doc).unwrap();
        assert!(data.contains("generated_at"));

        let parsed = bill_from_json(&data).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn malformed_csv_is_rejected() {
        assert!(parse_bill_csv("Item,Quantity,Price,Total\nBurger,two,1,2\n").is_err());
    }

    #[test]
    fn export_filenames() {
        assert_eq!(print_filename("ORD-2026-0007"), "bill_ORD-2026-0007.txt");
        assert_eq!(csv_filename(7), "bill_order_7.csv");
        assert_eq!(json_filename(7), "bill_order_7.json");
    }
}
