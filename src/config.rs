//! Application configuration management.
//!
//! All configuration values the data core needs, loaded from the
//! environment with defaults that work out of the box for a local,
//! unencrypted store.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - Production deployments should encrypt the store at rest

use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name the app runs under (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/pet_manager.db"
    #[envconfig(default = "sqlite:pet_manager.db?mode=rwc")]
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

/// Global application configuration instance.
///
/// Loaded on first access; every field has a default, so initialization
/// only fails on malformed environment values.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
