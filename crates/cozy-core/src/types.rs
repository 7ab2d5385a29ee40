//! # Domain Types
//!
//! Core domain types used throughout the Cozy Home storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Category     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  phone (unique) │   │  name (unique)  │   │  name (unique)  │       │
//! │  │  role           │◄┐ │  parent_id ─────┼─┐ │  price_cents    │       │
//! │  │  name           │ │ └─────────────────┘ │ │  category_id ───┼──┐    │
//! │  └─────────────────┘ │         ▲           │ └─────────────────┘  │    │
//! │                      │         └───────────┘         ▲            │    │
//! │                      │   (self-referential forest)   │            │    │
//! │  ┌─────────────────┐ │                               │            │    │
//! │  │   OrderLine     │─┘ user_id                       │            │    │
//! │  │  ─────────────  │───────────── product_id ────────┘            │    │
//! │  │  quantity       │                                              │    │
//! │  │  unit_price     │   status: InCart ──checkout──► Placed        │    │
//! │  │  total_price    │                                              │    │
//! │  └─────────────────┘       Category ◄─────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cart vs. Order
//! There is no separate cart table. A cart item is an `orders` row whose
//! status is [`OrderStatus::InCart`]; checkout flips the user's rows to
//! [`OrderStatus::Placed`] in one transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// User Role
// =============================================================================

/// What a user is allowed to do in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Browses the catalog and places orders.
    Buyer,
    /// Everything a buyer can do, plus adding products.
    Seller,
}

impl UserRole {
    /// Stored/serialized token for this role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
        }
    }

    /// Whether this role may list new products.
    #[inline]
    pub const fn can_add_products(&self) -> bool {
        matches!(self, UserRole::Seller)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Buyer
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the role picked in the registration form, case-insensitively.
impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(UserRole::Buyer),
            "seller" => Ok(UserRole::Seller),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["buyer".to_string(), "seller".to_string()],
            }),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an `orders` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Sitting in the user's cart.
    InCart,
    /// Checked out.
    Placed,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InCart => "in_cart",
            OrderStatus::Placed => "placed",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::InCart
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered storefront account.
///
/// The password credential is deliberately absent: it never leaves the
/// database layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: i64,

    /// Login identifier, unique across users.
    pub phone: String,

    pub role: UserRole,

    /// Display name shown in the header and settings form.
    pub name: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_seller(&self) -> bool {
        self.role == UserRole::Seller
    }
}

/// Data required to register a user.
///
/// `password_hash` is already a PHC string produced by
/// [`crate::password::hash_password`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
}

// =============================================================================
// Category
// =============================================================================

/// A node in the catalog forest. Roots have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

impl Category {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,

    /// Display name, unique across the catalog.
    pub name: String,

    /// Price in kopecks. Zero is allowed (free-to-play games).
    pub price_cents: i64,

    pub description: String,

    /// File name inside the images directory, if an image was attached.
    pub image_path: Option<String>,

    /// The category this product is listed directly under.
    pub category_id: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Data required to list a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub description: String,
    pub image_path: Option<String>,
    pub category_id: i64,
}

// =============================================================================
// Order Line
// =============================================================================

/// One `orders` row joined with its product name.
///
/// Uses the snapshot pattern: the unit price is frozen when the line is
/// added to the cart, so later price changes never re-price it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Always `unit_price_cents * quantity`.
    pub total_price_cents: i64,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub placed_at: Option<DateTime<Utc>>,
}

impl OrderLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// Line shown in the order details dialog: name, quantity and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("Seller".parse::<UserRole>().unwrap(), UserRole::Seller);
        assert_eq!(" buyer ".parse::<UserRole>().unwrap(), UserRole::Buyer);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Seller.can_add_products());
        assert!(!UserRole::Buyer.can_add_products());
        assert_eq!(UserRole::default(), UserRole::Buyer);
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(OrderStatus::InCart.to_string(), "in_cart");
        assert_eq!(OrderStatus::Placed.to_string(), "placed");
        assert_eq!(OrderStatus::default(), OrderStatus::InCart);
    }

    #[test]
    fn test_serde_tokens_match_storage() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InCart).unwrap(),
            "\"in_cart\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Seller).unwrap(),
            "\"seller\""
        );
    }

    #[test]
    fn test_category_root() {
        let root = Category {
            id: 1,
            name: "Books".to_string(),
            parent_id: None,
        };
        let child = Category {
            id: 2,
            name: "Novel".to_string(),
            parent_id: Some(1),
        };
        assert!(root.is_root());
        assert!(!child.is_root());
    }
}
