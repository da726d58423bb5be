/// Application settings loaded from config.toml
pub mod app;

/// Database configuration and connection management
pub mod database;

/// User nickname configuration from environment variables
pub mod users;

pub use app::{AppConfig, DashboardConfig, load_app_config};
