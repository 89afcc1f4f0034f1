//! # Store Configuration
//!
//! Configuration for opening the reservation store, read from environment
//! variables with defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: "sqlite://roomresv.db")
//! - `DB_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `DEFAULT_LOCALE`: Locale read when a translation is missing (optional)
//! - `LOG_LEVEL`: Logging level (default: "info")

use eyre::{Result, WrapErr};
use roomresv_core::i18n::TranslationFallback;
use std::env;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite connection string
    pub database_url: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Policy applied by localized reads
    pub fallback: TranslationFallback,

    /// Log level for the binaries
    pub log_level: Level,
}

impl DbConfig {
    /// Creates a new DbConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DB_MAX_CONNECTIONS` is set but is not a positive
    /// integer.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://roomresv.db".to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;
        if max_connections == 0 {
            eyre::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let fallback = match env::var("DEFAULT_LOCALE") {
            Ok(code) if !code.trim().is_empty() => TranslationFallback::Locale(code.trim().to_string()),
            _ => TranslationFallback::None,
        };

        let log_level = parse_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        Ok(Self {
            database_url,
            max_connections,
            fallback,
            log_level,
        })
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, defaulting to INFO.
pub fn parse_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
