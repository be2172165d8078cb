//! # Catalog Repository
//!
//! Database operations for the menu catalog.
//!
//! The catalog is read-mostly: the terminal lists or searches it to
//! open an order session, and the seeder upserts the fixed menu at
//! setup time. Nothing else writes to it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use rasoi_core::MenuItem;

/// Row shape for `menu_items`; columns map 1:1 onto [`MenuItem`].
#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    category: String,
    price: f64,
    image_path: Option<String>,
    tax_percent: f64,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            image_path: row.image_path,
            tax_percent: row.tax_percent,
        }
    }
}

/// Repository for menu catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists the full menu in ascending id order.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, image_path, tax_percent
            FROM menu_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Case-insensitive substring search over item names.
    pub async fn search(&self, term: &str) -> DbResult<Vec<MenuItem>> {
        debug!(term = %term, "Searching catalog");

        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, image_path, tax_percent
            FROM menu_items
            WHERE lower(name) LIKE '%' || lower(?1) || '%'
            ORDER BY id
            "#,
        )
        .bind(term.trim())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Gets a single item by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<MenuItem>> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, image_path, tax_percent
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MenuItem::from))
    }

    /// Number of items in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts or updates one catalog entry, keyed by its fixed id.
    ///
    /// Used by the seeder; an existing row is refreshed in place so
    /// re-seeding converges instead of duplicating.
    pub async fn upsert(&self, item: &MenuItem) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, category, price, image_path, tax_percent)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                price = excluded.price,
                image_path = excluded.image_path,
                tax_percent = excluded.tax_percent
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.price)
        .bind(&item.image_path)
        .bind(item.tax_percent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
