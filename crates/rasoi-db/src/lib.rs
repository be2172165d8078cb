//! # rasoi-db: Database Layer for Rasoi POS
//!
//! SQLite persistence for the Rasoi POS system, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Rasoi POS Data Flow                         │
//! │                                                                 │
//! │  Terminal command (submit order / report / login)               │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  rasoi-db (THIS CRATE)                    │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐  ┌──────────────┐  ┌──────────────────┐  │  │
//! │  │  │  Database  │  │ Repositories │  │    Migrations    │  │  │
//! │  │  │ (pool.rs)  │◄─│ catalog      │  │    (embedded)    │  │  │
//! │  │  │            │  │ ledger       │  │ 001_initial_*.sql│  │  │
//! │  │  │ SqlitePool │  │ report       │  │                  │  │  │
//! │  │  └────────────┘  └──────────────┘  └──────────────────┘  │  │
//! │  │        ▲                                                  │  │
//! │  │        └── auth (access gate) / seed (first run)          │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (./rasoi.db)                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Persistence, ledger, and auth error types
//! - [`repository`] - Catalog, order ledger, and report repositories
//! - [`auth`] - Credential store and access gate
//! - [`seed`] - Default users and the fixed menu
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rasoi_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./rasoi.db")).await?;
//!
//! let role = db.access_gate().login("admin", "admin123", Role::Admin).await?;
//! let menu = db.catalog().list().await?;
//! let order = db.ledger().submit(&draft).await?;
//! let report = db.reports().sales_summary(ReportPeriod::Day, now).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AuthError, DbResult, LedgerError, PersistenceError};
pub use pool::{Database, DbConfig};

pub use auth::{AccessGate, CredentialStore, SqliteCredentialStore};
pub use repository::catalog::CatalogRepository;
pub use repository::ledger::OrderLedger;
pub use repository::report::ReportRepository;
