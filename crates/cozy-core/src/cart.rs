//! # Cart Math
//!
//! Builds cart lines and sums them. The database layer stores whatever
//! [`NewCartItem`] computed; it never recalculates totals.
//!
//! ```text
//! Product { price_cents: 59_900 }   quantity: 2
//!          │                           │
//!          └──────────┬────────────────┘
//!                     ▼
//!     NewCartItem::for_product ← validates qty, freezes unit price
//!                     │
//!                     ▼
//!     NewCartItem { unit_price_cents: 59_900, total_price_cents: 119_800 }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderLine, Product};
use crate::validation::validate_quantity;

// =============================================================================
// New Cart Item
// =============================================================================

/// A cart line ready to be inserted as an `in_cart` order row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Product price at the moment the line was added.
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
}

impl NewCartItem {
    /// Prices `quantity` units of `product` for `user_id`.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] when the quantity is outside `1..=999`
    /// - [`CoreError::AmountOverflow`] when the total does not fit in i64
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use cozy_core::{NewCartItem, Product};
    ///
    /// let product = Product {
    ///     id: 7,
    ///     name: "Hat MW".to_string(),
    ///     price_cents: 79_900,
    ///     description: "Wool hat".to_string(),
    ///     image_path: None,
    ///     category_id: 5,
    ///     created_at: Utc::now(),
    /// };
    ///
    /// let item = NewCartItem::for_product(1, &product, 3).unwrap();
    /// assert_eq!(item.total_price_cents, 239_700);
    /// ```
    pub fn for_product(user_id: i64, product: &Product, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;

        let total = product
            .price()
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: format!("cart line for product {}", product.id),
            })?;

        Ok(NewCartItem {
            user_id,
            product_id: product.id,
            quantity,
            unit_price_cents: product.price_cents,
            total_price_cents: total.cents(),
        })
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Summary shown under the cart list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Number of cart lines.
    pub line_count: usize,
    /// Sum of quantities across lines.
    pub item_count: i64,
    pub total_cents: i64,
}

impl CartTotals {
    /// Sums order lines using the totals stored on each line.
    pub fn from_lines(lines: &[OrderLine]) -> CoreResult<Self> {
        let mut total = Money::zero();
        for line in lines {
            total = total
                .checked_add(line.total())
                .ok_or_else(|| CoreError::AmountOverflow {
                    context: "cart total".to_string(),
                })?;
        }

        Ok(CartTotals {
            line_count: lines.len(),
            item_count: lines.iter().map(|l| l.quantity).sum(),
            total_cents: total.cents(),
        })
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use chrono::Utc;

    fn product(price_cents: i64) -> Product {
        Product {
            id: 3,
            name: "Socks UO".to_string(),
            price_cents,
            description: "Cotton socks".to_string(),
            image_path: None,
            category_id: 5,
            created_at: Utc::now(),
        }
    }

    fn line(id: i64, quantity: i64, unit: i64) -> OrderLine {
        OrderLine {
            id,
            user_id: 1,
            product_id: 3,
            product_name: "Socks UO".to_string(),
            quantity,
            unit_price_cents: unit,
            total_price_cents: unit * quantity,
            status: OrderStatus::InCart,
            created_at: Utc::now(),
            placed_at: None,
        }
    }

    #[test]
    fn test_for_product_freezes_price() {
        let item = NewCartItem::for_product(1, &product(59_900), 2).unwrap();
        assert_eq!(item.product_id, 3);
        assert_eq!(item.unit_price_cents, 59_900);
        assert_eq!(item.total_price_cents, 119_800);
        assert_eq!(item.total().to_string(), "1198.00");
    }

    #[test]
    fn test_free_product_has_zero_total() {
        let item = NewCartItem::for_product(1, &product(0), 5).unwrap();
        assert_eq!(item.total_price_cents, 0);
    }

    #[test]
    fn test_for_product_rejects_bad_quantity() {
        assert!(matches!(
            NewCartItem::for_product(1, &product(100), 0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            NewCartItem::for_product(1, &product(100), 1000),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_for_product_detects_overflow() {
        let result = NewCartItem::for_product(1, &product(i64::MAX / 2), 3);
        assert!(matches!(result, Err(CoreError::AmountOverflow { .. })));
    }

    #[test]
    fn test_totals_from_lines() {
        let lines = vec![line(1, 2, 29_900), line(2, 1, 59_900)];
        let totals = CartTotals::from_lines(&lines).unwrap();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total_cents, 119_700);
        assert!(!totals.is_empty());

        assert!(CartTotals::from_lines(&[]).unwrap().is_empty());
    }
}
