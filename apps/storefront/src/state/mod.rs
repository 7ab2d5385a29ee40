//! # State Module
//!
//! Application state handed to the storefront commands.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each command
//! takes only the pieces it needs. There are no globals: the bootstrap
//! builds these once and passes them in.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   DbState    │  │ SessionState │  │ ConfigState  │  │ ImageStore │  │
//! │  │              │  │              │  │              │  │            │  │
//! │  │  Database    │  │ Arc<Mutex<   │  │ store name   │  │ images/    │  │
//! │  │  (SQLite     │  │  Option<     │  │ currency     │  │ directory  │  │
//! │  │   pool)      │  │   User>>>    │  │ data dir     │  │            │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • SessionState: Protected by Arc<Mutex<T>>                            │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod images;
mod session;

pub use config::{ConfigState, DATABASE_FILE, IMAGES_DIR};
pub use db::DbState;
pub use images::ImageStore;
pub use session::SessionState;
