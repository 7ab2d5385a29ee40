//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing the products filed directly under one category
//! - Lookup by id for the product page
//! - Inserting new listings (sellers only, enforced by the command layer)
//!
//! Browsing is not recursive: products in "Men's" do not show up when the
//! user opens "Clothing".

use chrono::Utc;
use cozy_core::{NewProduct, Product};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str =
    "id, name, price_cents, description, image_path, category_id, created_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let products = repo.list_by_category(category_id).await?;
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Products whose category is exactly `category_id`, ordered by id.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<Product>> {
        debug!(category_id, "Listing products");

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = ? ORDER BY id"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Category returned products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with generated id and timestamp
    /// * `Err(DbError::UniqueViolation)` - Name already taken
    /// * `Err(DbError::ForeignKeyViolation)` - Category does not exist
    /// * `Err(DbError::ConstraintViolation)` - Negative price
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, category_id = product.category_id, "Inserting product");

        let inserted = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, price_cents, description, image_path, category_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(&product.description)
        .bind(&product.image_path)
        .bind(product.category_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&product.name))?;

        info!(product_id = inserted.id, name = %inserted.name, "Product added");
        Ok(inserted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
