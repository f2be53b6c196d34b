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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("{setting} must use one of: {expected}")]
    UnsupportedScheme {
        setting: &'static str,
        expected: &'static str,
    },

    #[error("Pool bounds are invalid: min {min}, max {max}")]
    InvalidPoolBounds { min: u32, max: u32 },

    #[error("Pool max_connections {max} exceeds the limit of {limit}")]
    PoolSizeTooLarge { max: u32, limit: u32 },

    #[error("Pool acquire timeout must be between 1 and {max_secs} seconds")]
    InvalidAcquireTimeout { max_secs: u64 },

    #[error("Redis connect timeout must be between 1 and {max_secs} seconds")]
    InvalidConnectTimeout { max_secs: u64 },

    #[error("Producer send timeout must be between 1 and 300 seconds")]
    InvalidSendTimeout,

    #[error("Producer retry budget exceeds maximum allowed (20)")]
    RetryBudgetTooLarge,

    #[error("Pacing window is invalid: min {min_ms}ms, max {max_ms}ms")]
    InvalidPacingWindow { min_ms: u64, max_ms: u64 },

    #[error("Stream max length must be positive")]
    InvalidStreamLength,

    #[error("Preview rows must be between 1 and 100")]
    InvalidPreviewRows,

    #[error("Invalid dashboard controls: {0}")]
    InvalidControls(#[from] crate::domain::foundation::ValidationError),
}
