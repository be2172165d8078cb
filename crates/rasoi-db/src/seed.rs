//! # First-Run Seeding
//!
//! Default users and the fixed 50-item menu.
//!
//! Seeding is convergent: users are inserted only when the `users`
//! table is empty, and menu rows are upserted by their fixed ids, so
//! running the seeder repeatedly (or against a live database) is safe.

use tracing::info;

use crate::auth::SqliteCredentialStore;
use crate::error::DbResult;
use crate::pool::Database;
use rasoi_core::{MenuItem, Role};

/// Default login credentials, created only when no users exist.
/// Plaintext, matching the reference deployment.
pub const DEFAULT_USERS: &[(&str, &str, Role)] = &[
    ("admin", "admin123", Role::Admin),
    ("cashier", "cashier123", Role::Cashier),
];

/// The fixed menu: (id, name, category, price, image file, tax %).
///
/// Image files are display hints for a front end; they are stored as
/// given without checking the file exists.
pub const DEFAULT_MENU: &[(i64, &str, &str, f64, &str, f64)] = &[
    (1, "Burger", "Food", 120.0, "burger.png", 5.0),
    (2, "Pizza", "Food", 250.0, "pizza.png", 7.0),
    (3, "Coke", "Drink", 50.0, "coke.png", 3.0),
    (4, "Water", "Drink", 20.0, "water.png", 2.0),
    (5, "Fries", "Snack", 80.0, "fries.png", 4.0),
    (6, "Paneer Butter Masala", "Indian", 180.0, "paneer_butter_masala.png", 5.0),
    (7, "Chicken Biryani", "Indian", 220.0, "chicken_biryani.png", 6.0),
    (8, "Masala Dosa", "Indian", 100.0, "masala_dosa.png", 4.0),
    (9, "Idli Sambar", "Indian", 80.0, "idli_sambar.png", 3.0),
    (10, "Medu Vada", "Indian", 90.0, "medu_vada.png", 4.0),
    (11, "Roti (2 pcs)", "Indian", 30.0, "roti.png", 2.0),
    (12, "Naan", "Indian", 40.0, "naan.png", 2.0),
    (13, "Butter Chicken", "Indian", 240.0, "butter_chicken.png", 6.0),
    (14, "Dal Tadka", "Indian", 130.0, "dal_tadka.png", 4.0),
    (15, "Chole Bhature", "Indian", 110.0, "chole_bhature.png", 4.0),
    (16, "Palak Paneer", "Indian", 170.0, "palak_paneer.png", 5.0),
    (17, "Pav Bhaji", "Indian", 90.0, "pav_bhaji.png", 3.0),
    (18, "Veg Pulao", "Indian", 120.0, "veg_pulao.png", 4.0),
    (19, "Samosa (2 pcs)", "Snack", 40.0, "samosa.png", 2.0),
    (20, "Kachori", "Snack", 35.0, "kachori.png", 2.0),
    (21, "Dhokla", "Snack", 60.0, "dhokla.png", 3.0),
    (22, "Aloo Paratha", "Indian", 70.0, "aloo_paratha.png", 3.0),
    (23, "Onion Pakora", "Snack", 50.0, "onion_pakora.png", 2.0),
    (24, "Momo (8 pcs)", "Snack", 110.0, "momo.png", 4.0),
    (25, "Spring Rolls", "Snack", 100.0, "spring_rolls.png", 4.0),
    (26, "Manchurian Dry", "Chinese", 130.0, "manchurian.png", 5.0),
    (27, "Fried Rice", "Chinese", 140.0, "fried_rice.png", 5.0),
    (28, "Hakka Noodles", "Chinese", 150.0, "hakka_noodles.png", 5.0),
    (29, "Chilli Chicken", "Chinese", 180.0, "chilli_chicken.png", 6.0),
    (30, "Tomato Soup", "Starter", 90.0, "tomato_soup.png", 3.0),
    (31, "Hot & Sour Soup", "Starter", 100.0, "hot_sour_soup.png", 3.0),
    (32, "Greek Salad", "Salad", 130.0, "greek_salad.png", 4.0),
    (33, "Caesar Salad", "Salad", 150.0, "caesar_salad.png", 4.0),
    (34, "Grilled Sandwich", "Snack", 90.0, "grilled_sandwich.png", 4.0),
    (35, "Cheese Sandwich", "Snack", 100.0, "cheese_sandwich.png", 4.0),
    (36, "Paneer Tikka", "Indian", 160.0, "paneer_tikka.png", 5.0),
    (37, "Tandoori Chicken", "Indian", 210.0, "tandoori_chicken.png", 6.0),
    (38, "Veg Thali", "Indian", 200.0, "veg_thali.png", 5.0),
    (39, "Non-Veg Thali", "Indian", 250.0, "nonveg_thali.png", 6.0),
    (40, "Ice Cream (Scoop)", "Dessert", 60.0, "ice_cream.png", 2.0),
    (41, "Gulab Jamun (2 pcs)", "Dessert", 50.0, "gulab_jamun.png", 2.0),
    (42, "Rasgulla (2 pcs)", "Dessert", 50.0, "rasgulla.png", 2.0),
    (43, "Lassi", "Drink", 70.0, "lassi.png", 3.0),
    (44, "Cold Coffee", "Drink", 90.0, "cold_coffee.png", 3.0),
    (45, "Fresh Lime Soda", "Drink", 60.0, "lime_soda.png", 3.0),
    (46, "Masala Chai", "Drink", 40.0, "masala_chai.png", 2.0),
    (47, "Espresso", "Drink", 70.0, "espresso.png", 3.0),
    (48, "Latte", "Drink", 90.0, "latte.png", 3.0),
    (49, "Chocolate Brownie", "Dessert", 100.0, "brownie.png", 4.0),
    (50, "Fruit Salad", "Salad", 80.0, "fruit_salad.png", 3.0),
];

/// Inserts the default users, but only when the table is empty.
/// An operator-managed user list is never overwritten.
pub async fn seed_users(db: &Database) -> DbResult<usize> {
    let store = SqliteCredentialStore::new(db.pool().clone());
    if store.count().await? > 0 {
        info!("Users already present, skipping user seed");
        return Ok(0);
    }

    for (username, password, role) in DEFAULT_USERS {
        store.add_user(username, password, *role).await?;
    }
    info!(count = DEFAULT_USERS.len(), "Seeded default users");
    Ok(DEFAULT_USERS.len())
}

/// Upserts the fixed menu by id; existing rows are refreshed.
pub async fn seed_menu(db: &Database) -> DbResult<usize> {
    let catalog = db.catalog();
    for &(id, name, category, price, image, tax_percent) in DEFAULT_MENU {
        catalog
            .upsert(&MenuItem {
                id,
                name: name.to_string(),
                category: category.to_string(),
                price,
                image_path: Some(image.to_string()),
                tax_percent,
            })
            .await?;
    }
    info!(count = DEFAULT_MENU.len(), "Seeded menu catalog");
    Ok(DEFAULT_MENU.len())
}

/// Runs both seed steps.
pub async fn seed(db: &Database) -> DbResult<()> {
    seed_users(db).await?;
    seed_menu(db).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[tokio::test]
    async fn seed_populates_users_and_menu() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed(&db).await.unwrap();

        let store = SqliteCredentialStore::new(db.pool().clone());
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(db.catalog().count().await.unwrap(), 50);

        let burger = db.catalog().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(burger.name, "Burger");
        assert_eq!(burger.tax_percent, 5.0);
    }

    #[tokio::test]
    async fn reseeding_converges() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed(&db).await.unwrap();
        seed(&db).await.unwrap();

        let store = SqliteCredentialStore::new(db.pool().clone());
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(db.catalog().count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn user_seed_skips_a_managed_user_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteCredentialStore::new(db.pool().clone());
        store
            .add_user("manager", "secret", Role::Admin)
            .await
            .unwrap();

        let inserted = seed_users(&db).await.unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
