//! Event channel connection settings (Redis Streams).

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const REDIS_SCHEMES: &[&str] = &["redis://", "rediss://"];

/// Longest the producer waits for the startup handshake.
const MAX_CONNECT_TIMEOUT_SECS: u64 = 300;

/// Where the producer publishes appointments.
///
/// `timeout_secs` bounds connect plus `PING`; a producer that cannot reach
/// Redis within it exits instead of generating events nobody receives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 60,
        }
    }
}

impl RedisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !REDIS_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err(ValidationError::UnsupportedScheme {
                setting: "REDIS__URL",
                expected: "redis://, rediss://",
            });
        }
        if !(1..=MAX_CONNECT_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidConnectTimeout {
                max_secs: MAX_CONNECT_TIMEOUT_SECS,
            });
        }
        Ok(())
    }
}
