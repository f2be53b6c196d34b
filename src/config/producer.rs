//! Producer configuration: topic, delivery policy and pacing

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_SEND_TIMEOUT_SECS: u64 = 300;
const MAX_RETRY_BUDGET: u32 = 20;

/// Producer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerConfig {
    /// Topic (stream key) appointments are published to
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Upper bound on a single send attempt, in seconds
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,

    /// Retries after the first attempt (total attempts = 1 + max_retries)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Lower bound of the pause between publications, in milliseconds
    #[serde(default = "default_pacing_min")]
    pub pacing_min_ms: u64,

    /// Upper bound of the pause between publications, in milliseconds
    #[serde(default = "default_pacing_max")]
    pub pacing_max_ms: u64,

    /// Approximate cap on stream length (`XADD MAXLEN ~`)
    #[serde(default = "default_stream_max_len")]
    pub stream_max_len: usize,
}

impl ProducerConfig {
    /// Get send timeout as Duration
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    pub fn pacing_min(&self) -> Duration {
        Duration::from_millis(self.pacing_min_ms)
    }

    pub fn pacing_max(&self) -> Duration {
        Duration::from_millis(self.pacing_max_ms)
    }

    /// Validate producer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PRODUCER__TOPIC"));
        }
        if self.send_timeout_secs == 0 || self.send_timeout_secs > MAX_SEND_TIMEOUT_SECS {
            return Err(ValidationError::InvalidSendTimeout);
        }
        if self.max_retries > MAX_RETRY_BUDGET {
            return Err(ValidationError::RetryBudgetTooLarge);
        }
        if self.pacing_min_ms > self.pacing_max_ms {
            return Err(ValidationError::InvalidPacingWindow {
                min_ms: self.pacing_min_ms,
                max_ms: self.pacing_max_ms,
            });
        }
        if self.stream_max_len == 0 {
            return Err(ValidationError::InvalidStreamLength);
        }
        Ok(())
    }
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            send_timeout_secs: default_send_timeout(),
            max_retries: default_max_retries(),
            pacing_min_ms: default_pacing_min(),
            pacing_max_ms: default_pacing_max(),
            stream_max_len: default_stream_max_len(),
        }
    }
}

fn default_topic() -> String {
    "appointments".to_string()
}

fn default_send_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_pacing_min() -> u64 {
    500
}

fn default_pacing_max() -> u64 {
    2_000
}

fn default_stream_max_len() -> usize {
    100_000
}
