//! # Database Migrations
//!
//! Embedded SQL migrations for Rasoi POS.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Startup                                                        │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  Check _sqlx_migrations table                                   │
//! │     │                                                           │
//! │     ├── 001_initial_schema.sql ✓ (already applied)              │
//! │     └── 002_...               ⬜ (pending - runs now)            │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  Record checksums, continue startup                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next number
//! 2. Name format: `NNN_description.sql`
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the
/// directory into the binary at compile time; no runtime file access.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent and ordered; each migration runs in its own
/// transaction and is recorded in `_sqlx_migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}
