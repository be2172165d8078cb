//! # rasoi-core: Pure Business Logic for Rasoi POS
//!
//! This crate is the heart of Rasoi POS. It contains the order
//! calculator, bill document generation, and report math as pure
//! functions with no database dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Rasoi POS Architecture                      │
//! │                                                                 │
//! │   apps/terminal (CLI)                                           │
//! │        │  login ─► menu ─► quantities ─► submit ─► bill/report  │
//! │        ▼                                                        │
//! │   ★ rasoi-core (THIS CRATE) ★                                   │
//! │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │
//! │   │  types   │ │ session  │ │ billing  │ │  report  │          │
//! │   │ MenuItem │ │ OrderSes │ │ BillDoc  │ │ periods  │          │
//! │   │  Order   │ │ totals   │ │ renders  │ │ ranking  │          │
//! │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │
//! │        │                                                        │
//! │        ▼                                                        │
//! │   rasoi-db (SQLite: ledger, catalog, credentials, reports)      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Order, Payment, ...)
//! - [`money`] - Rounding and currency formatting helpers
//! - [`validation`] - Quantity/discount field parsing
//! - [`session`] - The order session and calculator
//! - [`billing`] - Bill documents and their three export formats
//! - [`report`] - Period boundaries and top-seller ranking
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same inputs produce the same outputs
//! 2. **No database access**: persistence lives in rasoi-db
//! 3. **Sum then round**: monetary accumulation keeps full floating
//!    precision; rounding to 2 decimals happens once, at the end
//! 4. **Explicit errors**: typed enums, never strings or panics

pub mod billing;
pub mod error;
pub mod money;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

pub use billing::BillDocument;
pub use error::{CoreError, RenderError, ValidationError};
pub use money::{format_amount, round2};
pub use session::OrderSession;
pub use types::*;

/// Timestamp format used everywhere a timestamp is persisted or
/// rendered. Lexicographic comparison of strings in this format equals
/// chronological comparison, which the report queries rely on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shorter form used on printed bills and structured exports.
pub const BILL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Number of items in the top-seller ranking.
pub const TOP_ITEMS_LIMIT: usize = 5;

/// Restaurant name printed on bill headers.
pub const STORE_NAME: &str = "RASOI RESTAURANT";
