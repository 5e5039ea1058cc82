//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Rate limit window must be greater than zero")]
    InvalidWindow,

    #[error("Rate limit max_requests must be greater than zero")]
    InvalidRequestLimit,

    #[error("Sweep interval must be greater than zero when eviction is background")]
    InvalidSweepInterval,

    #[error("Session TTL must be greater than zero")]
    InvalidSessionTtl,

    #[error("Log level filter cannot be empty")]
    EmptyLogLevel,
}
