//! # Order Repository
//!
//! Cart lines and placed orders share the `orders` table; the status column
//! tells them apart.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add_to_cart ──► [in_cart] ──── checkout (one transaction) ──► [placed]│
//! │                      │                                                  │
//! │                      └── remove_from_cart ──► (row deleted)             │
//! │                                                                         │
//! │   cart_items(user)  = rows with status in_cart                          │
//! │   orders(user)      = every other row                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are written once, when the line is added, and never recomputed.

use chrono::Utc;
use cozy_core::{NewCartItem, OrderItem, OrderLine, OrderStatus};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const LINE_SELECT: &str = "SELECT o.id, o.user_id, o.product_id, p.name AS product_name, \
     o.quantity, o.unit_price_cents, o.total_price_cents, o.status, o.created_at, o.placed_at \
     FROM orders o JOIN products p ON p.id = o.product_id";

/// Repository for cart lines and orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Stores a priced cart line.
    ///
    /// The caller computes the totals (see [`NewCartItem::for_product`]);
    /// the schema rejects a total that is not `unit_price x quantity`.
    ///
    /// ## Returns
    /// * `Ok(OrderLine)` - The new cart line
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown user or product
    pub async fn add_to_cart(&self, item: &NewCartItem) -> DbResult<OrderLine> {
        debug!(
            user_id = item.user_id,
            product_id = item.product_id,
            quantity = item.quantity,
            "Adding cart line"
        );

        let id = sqlx::query(
            "INSERT INTO orders (user_id, product_id, quantity, unit_price_cents, total_price_cents, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.user_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(item.total_price_cents)
        .bind(OrderStatus::InCart)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_line(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// The user's cart, oldest line first.
    pub async fn cart_items(&self, user_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(&format!(
            "{LINE_SELECT} WHERE o.user_id = ? AND o.status = ? ORDER BY o.id"
        ))
        .bind(user_id)
        .bind(OrderStatus::InCart)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id, count = lines.len(), "Loaded cart");
        Ok(lines)
    }

    /// Deletes one cart line.
    ///
    /// Placed orders are never deleted: a placed id yields `NotFound`.
    pub async fn remove_from_cart(&self, item_id: i64) -> DbResult<()> {
        debug!(item_id, "Removing cart line");

        let result = sqlx::query("DELETE FROM orders WHERE id = ? AND status = ?")
            .bind(item_id)
            .bind(OrderStatus::InCart)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cart item", item_id));
        }

        Ok(())
    }

    /// Places every cart line of `user_id` in a single transaction.
    ///
    /// ## What This Does
    /// ```text
    /// BEGIN
    ///   UPDATE orders SET status = 'placed', placed_at = now
    ///    WHERE user_id = ? AND status = 'in_cart'
    /// COMMIT
    /// ```
    /// Other users' carts are untouched. An empty cart places nothing.
    ///
    /// ## Returns
    /// Ids of the rows that were placed, ascending.
    pub async fn checkout(&self, user_id: i64) -> DbResult<Vec<i64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut placed: Vec<i64> = sqlx::query_scalar(
            "UPDATE orders SET status = ?, placed_at = ? \
             WHERE user_id = ? AND status = ? RETURNING id",
        )
        .bind(OrderStatus::Placed)
        .bind(Utc::now())
        .bind(user_id)
        .bind(OrderStatus::InCart)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        placed.sort_unstable();
        info!(user_id, lines = placed.len(), "Checkout complete");
        Ok(placed)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// The user's placed orders, newest first.
    pub async fn orders(&self, user_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(&format!(
            "{LINE_SELECT} WHERE o.user_id = ? AND o.status <> ? ORDER BY o.id DESC"
        ))
        .bind(user_id)
        .bind(OrderStatus::InCart)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// A placed order by id. Cart lines are not orders and yield `None`.
    pub async fn get_order(&self, order_id: i64) -> DbResult<Option<OrderLine>> {
        let line = sqlx::query_as::<_, OrderLine>(&format!(
            "{LINE_SELECT} WHERE o.id = ? AND o.status <> ?"
        ))
        .bind(order_id)
        .bind(OrderStatus::InCart)
        .fetch_optional(&self.pool)
        .await?;

        Ok(line)
    }

    /// Items of a placed order for the details dialog.
    ///
    /// Every order row holds a single product, so this yields one item, or
    /// none when the order does not exist.
    pub async fn order_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT o.product_id, p.name AS product_name, o.quantity, \
                    o.unit_price_cents, o.total_price_cents \
             FROM orders o JOIN products p ON p.id = o.product_id \
             WHERE o.id = ? AND o.status <> ?",
        )
        .bind(order_id)
        .bind(OrderStatus::InCart)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Any row by id, whatever its status.
    ///
    /// The command layer uses this to check who owns a line before acting
    /// on it.
    pub async fn get_line(&self, id: i64) -> DbResult<Option<OrderLine>> {
        let line = sqlx::query_as::<_, OrderLine>(&format!("{LINE_SELECT} WHERE o.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(line)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::seed::SEED_SELLER_PHONE;
    use cozy_core::password::hash_password;
    use cozy_core::{NewUser, Product, User, UserRole};

    struct Fixture {
        db: Database,
        seller: User,
        buyer: User,
        hat: Product,
        socks: Product,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let seller = db.users().get_by_phone(SEED_SELLER_PHONE).await.unwrap().unwrap();
        let buyer = db
            .users()
            .insert(&NewUser {
                name: "Anna".to_string(),
                phone: "+79990001122".to_string(),
                password_hash: hash_password("secret").unwrap(),
                role: UserRole::Buyer,
            })
            .await
            .unwrap();

        let mens = db
            .categories()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Men's")
            .unwrap();
        let mut products = db.products().list_by_category(mens.id).await.unwrap();
        let socks = products.remove(2);
        let hat = products.remove(1);

        Fixture {
            db,
            seller,
            buyer,
            hat,
            socks,
        }
    }

    #[tokio::test]
    async fn test_add_and_list_cart() {
        let f = fixture().await;
        let orders = f.db.orders();

        let item = NewCartItem::for_product(f.buyer.id, &f.hat, 2).unwrap();
        let line = orders.add_to_cart(&item).await.unwrap();
        assert_eq!(line.product_name, "Hat MW");
        assert_eq!(line.status, OrderStatus::InCart);
        assert_eq!(line.total_price_cents, 159_800);
        assert!(line.placed_at.is_none());

        orders
            .add_to_cart(&NewCartItem::for_product(f.buyer.id, &f.socks, 1).unwrap())
            .await
            .unwrap();

        let cart = orders.cart_items(f.buyer.id).await.unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].id, line.id);
        assert!(orders.cart_items(f.seller.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_total_is_frozen_at_add_time() {
        let f = fixture().await;
        let orders = f.db.orders();
        let line = orders
            .add_to_cart(&NewCartItem::for_product(f.buyer.id, &f.hat, 3).unwrap())
            .await
            .unwrap();

        sqlx::query("UPDATE products SET price_cents = 1 WHERE id = ?")
            .bind(f.hat.id)
            .execute(f.db.pool())
            .await
            .unwrap();

        let cart = orders.cart_items(f.buyer.id).await.unwrap();
        assert_eq!(cart[0].id, line.id);
        assert_eq!(cart[0].unit_price_cents, 79_900);
        assert_eq!(cart[0].total_price_cents, 239_700);
    }

    #[tokio::test]
    async fn test_inconsistent_total_rejected() {
        let f = fixture().await;
        let mut item = NewCartItem::for_product(f.buyer.id, &f.hat, 2).unwrap();
        item.total_price_cents += 1;

        let err = f.db.orders().add_to_cart(&item).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let f = fixture().await;
        let mut item = NewCartItem::for_product(f.buyer.id, &f.hat, 1).unwrap();
        item.product_id = 9999;

        let err = f.db.orders().add_to_cart(&item).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_remove_from_cart() {
        let f = fixture().await;
        let orders = f.db.orders();
        let line = orders
            .add_to_cart(&NewCartItem::for_product(f.buyer.id, &f.hat, 1).unwrap())
            .await
            .unwrap();

        orders.remove_from_cart(line.id).await.unwrap();
        assert!(orders.cart_items(f.buyer.id).await.unwrap().is_empty());

        let err = orders.remove_from_cart(line.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_checkout_moves_cart_to_orders_for_one_user_only() {
        let f = fixture().await;
        let orders = f.db.orders();

        let a = orders
            .add_to_cart(&NewCartItem::for_product(f.buyer.id, &f.hat, 1).unwrap())
            .await
            .unwrap();
        let b = orders
            .add_to_cart(&NewCartItem::for_product(f.buyer.id, &f.socks, 4).unwrap())
            .await
            .unwrap();
        let sellers = orders
            .add_to_cart(&NewCartItem::for_product(f.seller.id, &f.socks, 1).unwrap())
            .await
            .unwrap();

        let placed = orders.checkout(f.buyer.id).await.unwrap();
        assert_eq!(placed, vec![a.id, b.id]);

        assert!(orders.cart_items(f.buyer.id).await.unwrap().is_empty());
        let history = orders.orders(f.buyer.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, b.id);
        assert!(history
            .iter()
            .all(|o| o.status == OrderStatus::Placed && o.placed_at.is_some()));

        // The seller's cart is untouched
        let seller_cart = orders.cart_items(f.seller.id).await.unwrap();
        assert_eq!(seller_cart.len(), 1);
        assert_eq!(seller_cart[0].id, sellers.id);
        assert!(orders.orders(f.seller.id).await.unwrap().is_empty());

        // Placed rows cannot be removed as cart lines
        assert!(orders.remove_from_cart(a.id).await.is_err());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_places_nothing() {
        let f = fixture().await;
        assert!(f.db.orders().checkout(f.buyer.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_details() {
        let f = fixture().await;
        let orders = f.db.orders();
        let line = orders
            .add_to_cart(&NewCartItem::for_product(f.buyer.id, &f.socks, 2).unwrap())
            .await
            .unwrap();

        // Still in the cart: not an order yet
        assert!(orders.get_order(line.id).await.unwrap().is_none());
        assert!(orders.order_items(line.id).await.unwrap().is_empty());
        assert!(orders.get_line(line.id).await.unwrap().is_some());

        orders.checkout(f.buyer.id).await.unwrap();

        let order = orders.get_order(line.id).await.unwrap().unwrap();
        assert_eq!(order.user_id, f.buyer.id);
        let items = orders.order_items(line.id).await.unwrap();
        assert_eq!(
            items,
            vec![OrderItem {
                product_id: f.socks.id,
                product_name: "Socks UO".to_string(),
                quantity: 2,
                unit_price_cents: 59_900,
                total_price_cents: 119_800,
            }]
        );
        assert!(orders.get_order(9999).await.unwrap().is_none());
    }
}
