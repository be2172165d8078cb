//! # Repository Pattern Implementation
//!
//! Each repository owns the SQL for one aggregate:
//!
//! - [`catalog`] - menu item reads and seeding upserts
//! - [`ledger`] - atomic order submission and order reads
//! - [`report`] - sales aggregation over a period window
//!
//! Repositories hold a cloned [`SqlitePool`](sqlx::SqlitePool) handle
//! and are cheap to construct per call via the accessors on
//! [`Database`](crate::Database).

pub mod catalog;
pub mod ledger;
pub mod report;
