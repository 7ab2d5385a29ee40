//! # Demo Data
//!
//! Fills a fresh database with one seller account, the category tree and a
//! handful of products so the storefront is usable on first launch.
//!
//! ```text
//! Clothing ─────────┬── Men's ──────────── Jacket KL, Hat MW, Socks UO
//!                   ├── Women's
//!                   └── Children's
//! Games ────────────┬── Computer games ─── Fortnite, Genshin Impact
//!                   └── Board games
//! Books ────────────┬── Novel ──────────── War and Peace, A Hero of Our Time
//!                   └── Novella, Comedy, Tragedy, Science fiction,
//!                       Poetry, Detective
//! Household items ──────────────────────── Steam iron, Refrigerator
//! ```
//!
//! Seeding only happens while the `users` table is empty, so it runs once
//! per database file.

use chrono::Utc;
use cozy_core::password::hash_password;
use cozy_core::{Money, UserRole};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

pub const SEED_SELLER_PHONE: &str = "+79161234567";
pub const SEED_SELLER_PASSWORD: &str = "password123";
pub const SEED_SELLER_NAME: &str = "Ivan Ivanov";

/// Root categories followed by their children, in display order.
const CATEGORY_TREE: &[(&str, &[&str])] = &[
    ("Clothing", &["Men's", "Women's", "Children's"]),
    ("Games", &["Computer games", "Board games"]),
    (
        "Books",
        &[
            "Novel",
            "Novella",
            "Comedy",
            "Tragedy",
            "Science fiction",
            "Poetry",
            "Detective",
        ],
    ),
    ("Household items", &[]),
];

/// (name, price in whole roubles, description, category name)
const PRODUCTS: &[(&str, i64, &str, &str)] = &[
    ("Jacket KL", 11235, "Stylish jacket for cold weather", "Men's"),
    ("Hat MW", 799, "Fashionable hat for any season", "Men's"),
    ("Socks UO", 599, "Warm and comfortable socks", "Men's"),
    ("Fortnite", 0, "Popular computer game", "Computer games"),
    ("Genshin Impact", 0, "Role-playing computer game", "Computer games"),
    ("War and Peace", 299, "Classic novel by Leo Tolstoy", "Novel"),
    ("A Hero of Our Time", 599, "Novel by Mikhail Lermontov", "Novel"),
    (
        "Steam iron",
        3000,
        "Steam iron with vertical steaming",
        "Household items",
    ),
    (
        "Refrigerator",
        32000,
        "Two-chamber refrigerator with No Frost",
        "Household items",
    ),
];

/// Inserts the demo data if no user exists yet.
///
/// Everything happens in one transaction: either the whole demo catalog
/// lands or nothing does.
///
/// ## Returns
/// `true` when data was inserted.
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<bool> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *tx)
        .await?;
    if users > 0 {
        debug!(users, "Database already populated, skipping seed");
        return Ok(false);
    }

    info!("Seeding demo data");
    let now = Utc::now();

    let password_hash =
        hash_password(SEED_SELLER_PASSWORD).map_err(|e| DbError::Internal(e.to_string()))?;
    sqlx::query(
        "INSERT INTO users (phone, password_hash, role, name, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(SEED_SELLER_PHONE)
    .bind(&password_hash)
    .bind(UserRole::Seller)
    .bind(SEED_SELLER_NAME)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // Roots first so their ids precede every child, matching browse order
    let mut category_ids: HashMap<&str, i64> = HashMap::new();
    for (root, _) in CATEGORY_TREE {
        let id = sqlx::query("INSERT INTO categories (name, parent_id) VALUES (?, NULL)")
            .bind(*root)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        category_ids.insert(root, id);
    }
    for (root, children) in CATEGORY_TREE {
        let parent_id = category_ids.get(root).copied();
        for child in children.iter() {
            let id = sqlx::query("INSERT INTO categories (name, parent_id) VALUES (?, ?)")
                .bind(*child)
                .bind(parent_id)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            category_ids.insert(child, id);
        }
    }

    for (name, roubles, description, category) in PRODUCTS {
        let category_id = category_ids
            .get(category)
            .copied()
            .ok_or_else(|| DbError::Internal(format!("seed category missing: {category}")))?;

        sqlx::query(
            "INSERT INTO products (name, price_cents, description, image_path, category_id, created_at) \
             VALUES (?, ?, ?, NULL, ?, ?)",
        )
        .bind(*name)
        .bind(Money::from_major(*roubles).cents())
        .bind(*description)
        .bind(category_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(
        categories = category_ids.len(),
        products = PRODUCTS.len(),
        "Demo data seeded"
    );
    Ok(true)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_seed_runs_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Database::new already seeded
        assert!(!seed_if_empty(db.pool()).await.unwrap());
        assert_eq!(db.users().count().await.unwrap(), 1);
        assert_eq!(db.products().count().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_seed_into_empty_database() {
        let db = Database::new(DbConfig::in_memory().seed_demo_data(false))
            .await
            .unwrap();

        assert!(seed_if_empty(db.pool()).await.unwrap());
        assert_eq!(db.categories().list_all().await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_seed_prices_are_kopecks() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let novel = db
            .categories()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Novel")
            .unwrap();
        let books = db.products().list_by_category(novel.id).await.unwrap();
        let names: Vec<_> = books.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["War and Peace", "A Hero of Our Time"]);
        assert_eq!(books[0].price_cents, 29_900);
    }
}
