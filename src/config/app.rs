//! Application settings loaded from config.toml
//!
//! Every key is optional; a missing file yields the defaults. The file only
//! tunes presentation (dashboard window, bucket label, currency), the store
//! and the bot token come from the environment.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Root of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dashboard aggregation and rendering settings
    pub dashboard: DashboardConfig,
}

/// `[dashboard]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of trailing calendar months in the bar chart, current month included
    pub window_months: u32,
    /// Bucket for expenses recorded without a category
    pub uncategorized_label: String,
    /// Prefix used when formatting amounts
    pub currency_symbol: String,
    /// Width in characters of the longest bar in text charts
    pub bar_width: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_months: 6,
            uncategorized_label: "Sem Categoria".to_string(),
            currency_symbol: "R$".to_string(),
            bar_width: 20,
        }
    }
}

impl AppConfig {
    /// Rejects settings the dashboard cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.dashboard.window_months == 0 {
            return Err(Error::Config {
                message: "dashboard.window_months must be at least 1".to_string(),
            });
        }
        if self.dashboard.bar_width == 0 {
            return Err(Error::Config {
                message: "dashboard.bar_width must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads and validates application settings from a TOML file.
///
/// A missing file is not an error: the defaults are returned instead.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - A value is out of range
pub fn load_app_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);

    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse TOML from {}: {e}", path.display()),
        })?
    } else {
        info!("No config file at {}, using defaults", path.display());
        AppConfig::default()
    };

    config.validate()?;
    Ok(config)
}

/// Path of the config file: `CONFIG_PATH`, or ./config.toml
#[must_use]
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}
