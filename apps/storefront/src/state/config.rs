//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`storefront.toml` in the platform config directory)
//! 3. Environment variables (`COZY_*`)
//!
//! ```toml
//! # storefront.toml
//! store_name = "Cozy Home"
//! currency_symbol = "₽"
//! data_dir = "/srv/cozy-home"
//! seed_demo_data = false
//! ```
//!
//! Configuration is read-only after initialization, so no mutex needed.

use cozy_core::Money;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::StartupError;

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "database.db";

/// Directory holding product images, inside the data directory.
pub const IMAGES_DIR: &str = "images";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the window title.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Whether the symbol follows the amount ("799.00 ₽") or leads it.
    pub symbol_after_amount: bool,

    /// Where `database.db` and `images/` live. `None` picks the platform
    /// data directory.
    pub data_dir: Option<PathBuf>,

    /// Seed the demo seller and catalog into a fresh database.
    pub seed_demo_data: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Cozy Home".to_string(),
            currency_symbol: "₽".to_string(),
            symbol_after_amount: true,
            data_dir: None,
            seed_demo_data: true,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, StartupError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.store_name.trim().is_empty() {
            return Err(StartupError::InvalidConfig(
                "store_name must not be empty".into(),
            ));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(StartupError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Applies `COZY_DATA_DIR` and `COZY_STORE_NAME`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("COZY_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(name) = lookup("COZY_STORE_NAME") {
            self.store_name = name;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "cozyhome", "storefront")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Resolves the data directory.
    ///
    /// ## Platform-Specific Defaults
    /// - **Linux**: `~/.local/share/storefront`
    /// - **macOS**: `~/Library/Application Support/com.cozyhome.storefront`
    /// - **Windows**: `%APPDATA%\cozyhome\storefront\data`
    pub fn data_dir(&self) -> Result<PathBuf, StartupError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or(StartupError::NoDataDir),
        }
    }

    /// `<data dir>/database.db`
    pub fn database_path(&self) -> Result<PathBuf, StartupError> {
        Ok(self.data_dir()?.join(DATABASE_FILE))
    }

    /// `<data dir>/images`
    pub fn images_dir(&self) -> Result<PathBuf, StartupError> {
        Ok(self.data_dir()?.join(IMAGES_DIR))
    }

    /// Formats a kopeck amount as a currency string.
    ///
    /// The scale is fixed at two decimals, matching [`Money`].
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(79_950), "799.50 ₽");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let amount = Money::from_cents(cents);

        if self.symbol_after_amount {
            format!("{} {}", amount, self.currency_symbol)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(79_950), "799.50 ₽");
        assert_eq!(config.format_currency(0), "0.00 ₽");
        assert_eq!(config.format_currency(1), "0.01 ₽");
        assert_eq!(config.format_currency(-1234), "-12.34 ₽");
    }

    #[test]
    fn test_format_currency_uses_kopeck_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "currency_decimals = 0\n").unwrap();

        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.format_currency(79_900), "799.00 ₽");
        assert_eq!(config.format_currency(-50), "-0.50 ₽");
    }

    #[test]
    fn test_format_currency_leading_symbol() {
        let config = ConfigState {
            currency_symbol: "$".to_string(),
            symbol_after_amount: false,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(1234), "$12.34");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "store_name = \"Corner Shop\"\nseed_demo_data = false\n").unwrap();

        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.store_name, "Corner Shop");
        assert!(!config.seed_demo_data);
        assert_eq!(config.currency_symbol, "₽");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "store_name = ").unwrap();

        assert!(matches!(
            ConfigState::load(Some(path)),
            Err(StartupError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.currency_symbol, "₽");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("COZY_DATA_DIR", "/tmp/cozy"),
            ("COZY_STORE_NAME", "Test Store"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigState::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Test Store");
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/cozy/database.db")
        );
        assert_eq!(
            config.images_dir().unwrap(),
            PathBuf::from("/tmp/cozy/images")
        );
    }

    #[test]
    fn test_validate() {
        let config = ConfigState {
            store_name: " ".to_string(),
            ..ConfigState::default()
        };
        assert!(config.validate().is_err());

        let config = ConfigState {
            currency_symbol: String::new(),
            ..ConfigState::default()
        };
        assert!(config.validate().is_err());
    }
}
