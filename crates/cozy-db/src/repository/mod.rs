//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Storefront command                                                    │
//! │       │                                                                 │
//! │       │  db.orders().cart_items(user_id)                               │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── add_to_cart(&self, item)                                          │
//! │  ├── cart_items(&self, user_id)                                        │
//! │  ├── checkout(&self, user_id)                                          │
//! │  └── orders(&self, user_id)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  SQL lives only in this module; commands never build queries.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Accounts and login
//! - [`CategoryRepository`](category::CategoryRepository) - Catalog tree
//! - [`ProductRepository`](product::ProductRepository) - Product listing and insert
//! - [`OrderRepository`](order::OrderRepository) - Cart lines, checkout, order history

pub mod category;
pub mod order;
pub mod product;
pub mod user;
