//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PRESSROOM` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use pressroom::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Rate limiting with {}", config.rate_limit.strategy);
//! ```

mod auth;
mod error;
mod rate_limit;
mod server;

pub use auth::{AuthConfig, MAX_SESSION_TTL_MS};
pub use error::{ConfigError, ValidationError};
pub use rate_limit::{
    EvictionMode, RateLimitConfig, DEFAULT_FIXED_WINDOW_LIMIT, DEFAULT_TOKEN_BUCKET_CAPACITY,
    DEFAULT_WINDOW_MS,
};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Process configuration (environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limiter strategy and limits
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Session settings
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PRESSROOM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PRESSROOM__RATE_LIMIT__STRATEGY=fixed_window` -> `rate_limit.strategy`
    /// - `PRESSROOM__RATE_LIMIT__MAX_REQUESTS=50` -> `rate_limit.max_requests`
    /// - `PRESSROOM__AUTH__SESSION_TTL_MS=3600000` -> `auth.session_ttl_ms`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRESSROOM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step, failing fast on bad limits.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.rate_limit.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
