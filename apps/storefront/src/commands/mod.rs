//! # Storefront Commands
//!
//! Everything the GUI can ask the backend to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── auth.rs      ◄─── register, login, logout, current_user
//! ├── catalog.rs   ◄─── browse_catalog, get_product, add_product
//! ├── cart.rs      ◄─── get_cart, add_to_cart, remove_from_cart, checkout
//! ├── orders.rs    ◄─── list_orders, get_order_details
//! └── settings.rs  ◄─── update_settings
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  GUI event (button click)                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn add_to_cart(                                                  │
//! │      db: &DbState,              ◄── Injected by the bootstrap          │
//! │      session: &SessionState,    ◄── Who is asking                      │
//! │      product_id: i64,           ◄── From the form                      │
//! │      quantity_text: &str,       ◄── Raw text, parsed here              │
//! │  ) -> Result<CartView, ApiError>                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  GUI re-renders from the returned view, or shows `ApiError.message`    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! async fn logout(session: &SessionState)
//!
//! // Needs database and session
//! async fn checkout(db: &DbState, session: &SessionState)
//!
//! // Needs images too
//! async fn browse_catalog(db: &DbState, images: &ImageStore, ...)
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod settings;
