//! # Cart Commands
//!
//! The cart is the set of the user's `orders` rows still `in_cart`, so it
//! survives restarts and logouts.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart  ┌──────────┐   checkout    ┌──────────┐    │
//! │  │  Empty   │──────────────►│ In Cart  │──────────────►│  Placed  │    │
//! │  │  Cart    │◄──────────────│  rows    │               │  orders  │    │
//! │  └──────────┘ remove_from_  └──────────┘               └──────────┘    │
//! │                 cart (last row)                                         │
//! │                                                                         │
//! │  Every line keeps the unit price it was added at.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cozy_core::validation::parse_quantity;
use cozy_core::{CartTotals, CoreError, NewCartItem, OrderLine, OrderStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState, SessionState};

/// One cart row with display prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
    pub unit_price: String,
    pub total: String,
}

impl CartLineView {
    pub(crate) fn new(line: OrderLine, config: &ConfigState) -> Self {
        CartLineView {
            unit_price: config.format_currency(line.unit_price_cents),
            total: config.format_currency(line.total_price_cents),
            id: line.id,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
            total_price_cents: line.total_price_cents,
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub totals: CartTotals,
    /// Formatted grand total, e.g. "1598.00 ₽".
    pub total: String,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    /// Ids of the placed order rows, ascending.
    pub order_ids: Vec<i64>,
    pub totals: CartTotals,
    pub total: String,
}

async fn load_cart(db: &DbState, config: &ConfigState, user_id: i64) -> Result<CartView, ApiError> {
    let lines = db.inner().orders().cart_items(user_id).await?;
    let totals = CartTotals::from_lines(&lines)?;

    Ok(CartView {
        items: lines
            .into_iter()
            .map(|line| CartLineView::new(line, config))
            .collect(),
        total: config.format_currency(totals.total_cents),
        totals,
    })
}

/// Gets the session user's cart.
pub async fn get_cart(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CartView, ApiError> {
    let user = session.require_user()?;
    load_cart(db, config, user.id).await
}

/// Adds `quantity_text` units of a product as a new cart line.
///
/// ## Behavior
/// - The quantity is parsed from the text field (`1..=999`)
/// - The unit price is frozen at the product's current price
/// - Adding the same product twice makes two lines
/// - Free products (price 0) can be added
///
/// ## Returns
/// Updated cart
pub async fn add_to_cart(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
    product_id: i64,
    quantity_text: &str,
) -> Result<CartView, ApiError> {
    let user = session.require_user()?;
    let quantity = parse_quantity(quantity_text)?;
    debug!(user_id = user.id, product_id, quantity, "add_to_cart command");

    let product = db
        .inner()
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let item = NewCartItem::for_product(user.id, &product, quantity)?;
    db.inner().orders().add_to_cart(&item).await?;

    load_cart(db, config, user.id).await
}

/// Removes one line from the session user's cart.
///
/// Lines of other users and placed orders are reported as not found.
pub async fn remove_from_cart(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
    item_id: i64,
) -> Result<CartView, ApiError> {
    let user = session.require_user()?;
    debug!(user_id = user.id, item_id, "remove_from_cart command");

    let orders = db.inner().orders();
    let owned = orders
        .get_line(item_id)
        .await?
        .is_some_and(|line| line.user_id == user.id && line.status == OrderStatus::InCart);

    if !owned {
        return Err(ApiError::not_found("Cart item", item_id));
    }

    orders.remove_from_cart(item_id).await?;
    load_cart(db, config, user.id).await
}

/// Places every line of the session user's cart.
///
/// ## Errors
/// * `CART_ERROR` - The cart is empty
pub async fn checkout(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CheckoutReceipt, ApiError> {
    let user = session.require_user()?;
    let cart = load_cart(db, config, user.id).await?;

    if cart.totals.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let order_ids = db.inner().orders().checkout(user.id).await?;
    info!(
        user_id = user.id,
        orders = order_ids.len(),
        total_cents = cart.totals.total_cents,
        "Order placed"
    );

    Ok(CheckoutReceipt {
        order_ids,
        totals: cart.totals,
        total: cart.total,
    })
}
