//! # Cozy Home Storefront Entry Point
//!
//! Loads configuration, opens the data directory and database, and reports
//! what is in the catalog. The GUI drives the same [`cozy_storefront::App`].
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `storefront.toml` and `COZY_*` overrides
//! 3. Open `<data dir>/database.db` (migrate + seed)
//! 4. Log readiness

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use cozy_storefront::state::ConfigState;

#[tokio::main]
async fn main() -> ExitCode {
    cozy_storefront::init_tracing();

    // Optional explicit config path as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ConfigState::load_or_default(config_path);
    info!(store = %config.store_name, "Starting storefront");

    let app = match cozy_storefront::start(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Storefront failed to start");
            return ExitCode::FAILURE;
        }
    };

    let db = app.db.inner();
    match (db.users().count().await, db.products().count().await) {
        (Ok(users), Ok(products)) => {
            info!(users, products, images = ?app.images.dir(), "Storefront ready");
        }
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "Database is not readable");
            db.close().await;
            return ExitCode::FAILURE;
        }
    }

    db.close().await;
    ExitCode::SUCCESS
}
