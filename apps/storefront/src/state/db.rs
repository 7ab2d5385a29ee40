//! # Database State
//!
//! Wraps the `Database` handle for use in storefront commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn get_product(db: &DbState, id: i64) -> Result<ProductView, ApiError> {
//!     let product = db.inner().products().get_by_id(id).await?;
//!     ...
//! }
//! ```

use cozy_db::Database;

/// Wrapper around `Database` handed to every command.
///
/// The pool inside is opened once at startup; commands never open their own
/// connections.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
