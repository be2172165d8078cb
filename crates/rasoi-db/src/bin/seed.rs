//! # Database Seeder
//!
//! Prepares a Rasoi POS database: runs migrations, inserts the default
//! users (only when no users exist), and upserts the fixed 50-item
//! menu.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p rasoi-db --bin seed
//!
//! # Specify database path
//! cargo run -p rasoi-db --bin seed -- --db ./data/rasoi.db
//! ```

use std::env;

use rasoi_db::seed;
use rasoi_db::{Database, DbConfig, SqliteCredentialStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./rasoi_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Rasoi POS Database Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./rasoi_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Rasoi POS Database Seeder");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let users = seed::seed_users(&db).await?;
    if users > 0 {
        println!("✓ Inserted {} default users", users);
    } else {
        println!("⚠ Users already present, user seed skipped");
    }

    let items = seed::seed_menu(&db).await?;
    println!("✓ Upserted {} menu items", items);

    let store = SqliteCredentialStore::new(db.pool().clone());
    println!();
    println!("Users in database: {}", store.count().await?);
    println!("Menu items in database: {}", db.catalog().count().await?);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
