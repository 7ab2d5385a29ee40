//! # Order Commands
//!
//! The "My orders" list and its details dialog. Only rows that went through
//! checkout are orders; cart lines never show up here.

use chrono::{DateTime, Utc};
use cozy_core::{CoreError, OrderItem, OrderLine, OrderStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState, SessionState};

/// One row of the order list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub total_price_cents: i64,
    pub total: String,
    pub status: OrderStatus,
    pub placed_at: Option<DateTime<Utc>>,
}

impl OrderView {
    fn new(line: OrderLine, config: &ConfigState) -> Self {
        OrderView {
            total: config.format_currency(line.total_price_cents),
            id: line.id,
            product_name: line.product_name,
            quantity: line.quantity,
            total_price_cents: line.total_price_cents,
            status: line.status,
            placed_at: line.placed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub total: String,
}

/// Contents of the order details dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order: OrderView,
    pub items: Vec<OrderItemView>,
}

/// The session user's orders, newest first.
pub async fn list_orders(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<Vec<OrderView>, ApiError> {
    let user = session.require_user()?;
    let lines = db.inner().orders().orders(user.id).await?;
    debug!(user_id = user.id, count = lines.len(), "list_orders command");

    Ok(lines
        .into_iter()
        .map(|line| OrderView::new(line, config))
        .collect())
}

/// One of the session user's orders with its items.
///
/// Orders of other users are reported as not found.
pub async fn get_order_details(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
    order_id: i64,
) -> Result<OrderDetails, ApiError> {
    let user = session.require_user()?;
    let orders = db.inner().orders();

    let order = orders
        .get_order(order_id)
        .await?
        .filter(|order| order.user_id == user.id)
        .ok_or(CoreError::OrderNotFound(order_id))?;

    let items = orders
        .order_items(order_id)
        .await?
        .into_iter()
        .map(|item: OrderItem| OrderItemView {
            unit_price: config.format_currency(item.unit_price_cents),
            total: config.format_currency(item.total_price_cents),
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
        })
        .collect();

    Ok(OrderDetails {
        order: OrderView::new(order, config),
        items,
    })
}
