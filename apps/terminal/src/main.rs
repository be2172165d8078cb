//! Rasoi POS Terminal
//!
//! Command-line front end for the Rasoi point-of-sale: login checks,
//! menu listing, order submission with bill exports, and sales
//! reports. All business rules live in rasoi-core; all SQL lives in
//! rasoi-db.

use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use rasoi_core::billing::{
    bill_to_csv, bill_to_json, csv_filename, json_filename, print_filename, render_preview,
    BillDocument, PrintRenderer,
};
use rasoi_core::report::{report_csv_filename, report_to_csv, ReportPeriod};
use rasoi_core::{
    format_amount, OrderMode, OrderSession, PaymentMethod, RenderError, Role,
};
use rasoi_db::seed;
use rasoi_db::{Database, DbConfig};

#[derive(Parser)]
#[command(name = "rasoi")]
#[command(about = "Rasoi POS terminal")]
#[command(version)]
struct Cli {
    /// Database file path
    #[arg(long, default_value = "./rasoi.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify login credentials
    Login {
        username: String,
        password: String,
        /// Expected role: admin or cashier
        #[arg(long, default_value = "cashier")]
        role: Role,
    },

    /// List the menu, optionally filtered by name
    Menu {
        /// Case-insensitive substring filter
        search: Option<String>,
    },

    /// Submit an order and write its bill exports
    Submit {
        /// Order line as ID=QTY; repeatable
        #[arg(long = "item", value_name = "ID=QTY", required = true)]
        items: Vec<String>,

        /// Flat discount amount
        #[arg(long, default_value = "0")]
        discount: String,

        /// Dine-In or Takeaway
        #[arg(long, default_value = "Dine-In")]
        mode: OrderMode,

        /// Cash, Card, or UPI
        #[arg(long = "pay", default_value = "Cash")]
        payment: PaymentMethod,

        /// Directory for bill exports
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Font file for the print-style bill; preview fallback when
        /// missing
        #[arg(long, default_value = "./fonts/DejaVuSans.ttf")]
        font: PathBuf,
    },

    /// Compute a sales report
    Report {
        /// day, week, or month
        #[arg(default_value = "day")]
        period: ReportPeriod,

        /// Also write the report as CSV into this directory
        #[arg(long, value_name = "DIR")]
        csv: Option<PathBuf>,
    },

    /// Seed default users and the fixed menu
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(DbConfig::new(&cli.db)).await?;

    match cli.command {
        Commands::Login {
            username,
            password,
            role,
        } => {
            let granted = db.access_gate().login(&username, &password, role).await?;
            println!("Login OK: {username} ({granted})");
        }

        Commands::Menu { search } => {
            let items = match &search {
                Some(term) => db.catalog().search(term).await?,
                None => db.catalog().list().await?,
            };
            for item in &items {
                println!(
                    "{:>3}  {:<24} {:<8} {:>10}  {:>4}%",
                    item.id,
                    item.name,
                    item.category,
                    format_amount(item.price),
                    item.tax_percent
                );
            }
            println!("{} items", items.len());
        }

        Commands::Submit {
            items,
            discount,
            mode,
            payment,
            out_dir,
            font,
        } => {
            let mut session = OrderSession::new(db.catalog().list().await?);
            session.set_mode(mode);
            session.set_payment_method(payment);
            session.set_discount(discount);
            for spec in &items {
                let (id, qty) = parse_item_spec(spec)?;
                session.set_quantity(id, qty);
            }

            let now = Local::now().naive_local();
            let draft = session.draft(now)?;
            let order = db.ledger().submit(&draft).await?;

            let doc = BillDocument::assemble(&order, &draft.lines, now);
            write_bill_exports(&doc, &out_dir, &font)?;

            println!(
                "Order {} submitted: {}",
                doc.invoice_number,
                format_amount(order.totals.final_total)
            );
        }

        Commands::Report { period, csv } => {
            let now = Local::now().naive_local();
            let report = db.reports().sales_summary(period, now).await?;
            db.reports().log_snapshot(&report, now).await?;

            println!("Sales report ({period}, since {})", report.start);
            println!("  Orders: {}", report.total_orders);
            println!("  Sales:  {}", format_amount(report.total_sales));
            println!("  Tax:    {}", format_amount(report.total_tax));
            if !report.top_items.is_empty() {
                println!("  Most sold:");
                for item in &report.top_items {
                    println!("    {:<24} x{}", item.name, item.quantity);
                }
            }

            if let Some(dir) = csv {
                let path = dir.join(report_csv_filename(&report));
                std::fs::write(&path, report_to_csv(&report)?)?;
                println!("Wrote {}", path.display());
            }
        }

        Commands::Seed => {
            seed::seed(&db).await?;
            println!(
                "Seeded: {} users, {} menu items",
                rasoi_db::SqliteCredentialStore::new(db.pool().clone())
                    .count()
                    .await?,
                db.catalog().count().await?
            );
        }
    }

    db.close().await;
    Ok(())
}

/// Parses one `ID=QTY` order line. The quantity stays a raw string so
/// the session validates it like any other quantity field.
fn parse_item_spec(spec: &str) -> Result<(i64, String), String> {
    let (id, qty) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{spec}'"))?;
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| format!("bad item id in '{spec}'"))?;
    Ok((id, qty.trim().to_string()))
}

/// Writes the print-style, CSV, and JSON bill exports.
///
/// A missing font downgrades the print document to the preview layout
/// rather than failing the submission; any other render error is
/// surfaced.
fn write_bill_exports(
    doc: &BillDocument,
    out_dir: &std::path::Path,
    font: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match PrintRenderer::load(font) {
        Ok(renderer) => renderer.render(doc),
        Err(RenderError::FontMissing { path }) => {
            debug!(path = %path.display(), "Font missing, using preview layout");
            render_preview(doc)
        }
        Err(e) => return Err(e.into()),
    };

    let print_path = out_dir.join(print_filename(&doc.invoice_number));
    std::fs::write(&print_path, text)?;

    let csv_path = out_dir.join(csv_filename(doc.order_id));
    std::fs::write(&csv_path, bill_to_csv(doc)?)?;

    let json_path = out_dir.join(json_filename(doc.order_id));
    std::fs::write(&json_path, bill_to_json(doc)?)?;

    println!(
        "Wrote {}, {}, {}",
        print_path.display(),
        csv_path.display(),
        json_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_spec_parses_id_and_raw_quantity() {
        assert_eq!(parse_item_spec("3=2").unwrap(), (3, "2".to_string()));
        assert_eq!(parse_item_spec(" 10 = 4 ").unwrap(), (10, "4".to_string()));
    }

    #[test]
    fn item_spec_rejects_bad_shapes() {
        assert!(parse_item_spec("3").is_err());
        assert!(parse_item_spec("x=2").is_err());
    }
}
