//! # Cozy Home Storefront
//!
//! Backend of the storefront desktop app: state, commands and the startup
//! sequence. A GUI links this library and calls [`commands`] with the
//! states held by [`App`].
//!
//! ## Module Organization
//! ```text
//! cozy_storefront/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── session.rs  ◄─── Logged-in user
//! │   ├── images.rs   ◄─── Product image directory
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── auth.rs     ◄─── register, login, logout
//! │   ├── catalog.rs  ◄─── browse, product details, add product
//! │   ├── cart.rs     ◄─── cart and checkout
//! │   ├── orders.rs   ◄─── order list and details
//! │   └── settings.rs ◄─── profile form
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cozy_db::{Database, DbConfig};
use error::StartupError;
use state::{ConfigState, DbState, ImageStore, SessionState};

/// Everything the commands need, built once at startup.
#[derive(Debug, Clone)]
pub struct App {
    pub db: DbState,
    pub session: SessionState,
    pub config: ConfigState,
    pub images: ImageStore,
}

/// Opens the data directory and the database.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Resolve data directory ───────────────────────────────────────────► │
/// │     • config `data_dir`, `COZY_DATA_DIR`, or the platform default       │
/// │     • created with its `images/` subdirectory                           │
/// │                                                                         │
/// │  2. Connect to database ──────────────────────────────────────────────► │
/// │     • `<data dir>/database.db`, WAL mode, foreign keys on               │
/// │     • Run pending migrations                                            │
/// │     • Seed demo data into an empty database (if enabled)                │
/// │                                                                         │
/// │  3. Initialize state objects ─────────────────────────────────────────► │
/// │     • DbState, SessionState (nobody logged in), ImageStore              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn start(config: ConfigState) -> Result<App, StartupError> {
    let data_dir = config.data_dir()?;
    let images = ImageStore::new(config.images_dir()?);
    images.ensure_dir().map_err(StartupError::DataDir)?;
    info!(?data_dir, "Data directory ready");

    let db_config = DbConfig::new(config.database_path()?).seed_demo_data(config.seed_demo_data);
    let db = Database::new(db_config).await?;
    info!("Database connected and migrations applied");

    Ok(App {
        db: DbState::new(db),
        session: SessionState::new(),
        config,
        images,
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cozy=trace` - Show trace for cozy crates only
/// - Default: `info,cozy=debug,sqlx=warn`
///
/// Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cozy=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> ConfigState {
        ConfigState {
            data_dir: Some(dir.to_path_buf()),
            ..ConfigState::default()
        }
    }

    #[tokio::test]
    async fn test_start_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");

        let app = start(config_in(&data)).await.unwrap();

        assert!(data.join(state::DATABASE_FILE).is_file());
        assert!(data.join(state::IMAGES_DIR).is_dir());
        assert!(app.db.inner().health_check().await);
        assert_eq!(app.db.inner().users().count().await.unwrap(), 1);
        app.db.inner().close().await;
    }

    #[tokio::test]
    async fn test_start_without_seed() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            seed_demo_data: false,
            ..config_in(dir.path())
        };

        let app = start(config).await.unwrap();
        assert_eq!(app.db.inner().users().count().await.unwrap(), 0);
        assert_eq!(app.db.inner().products().count().await.unwrap(), 0);
    }
}
