//! Appointment store connection settings.
//!
//! The dashboard issues a single query per refresh cycle, so the pool is kept
//! small; connections are opened lazily by `connect_pool`.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

/// Upper bound on pooled connections for one dashboard process.
pub const MAX_POOL_CONNECTIONS: u32 = 16;

/// Longest a refresh cycle may wait for a pooled connection.
const MAX_ACQUIRE_TIMEOUT_SECS: u64 = 60;

/// PostgreSQL settings for reading the `appointments` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `postgres://` URL of the store the downstream consumer writes to
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// How long a cycle waits for a connection before reporting a query failure
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Apply `migrations/` on startup (local development only)
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 1,
            max_connections: 5,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Checks the store settings the dashboard binary depends on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !POSTGRES_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err(ValidationError::UnsupportedScheme {
                setting: "DATABASE__URL",
                expected: "postgres://, postgresql://",
            });
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolBounds {
                min: self.min_connections,
                max: self.max_connections,
            });
        }
        if self.max_connections > MAX_POOL_CONNECTIONS {
            return Err(ValidationError::PoolSizeTooLarge {
                max: self.max_connections,
                limit: MAX_POOL_CONNECTIONS,
            });
        }
        if !(1..=MAX_ACQUIRE_TIMEOUT_SECS).contains(&self.acquire_timeout_secs) {
            return Err(ValidationError::InvalidAcquireTimeout {
                max_secs: MAX_ACQUIRE_TIMEOUT_SECS,
            });
        }
        Ok(())
    }
}
