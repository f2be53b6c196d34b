//! PublishAppointmentHandler - Delivers one appointment to the event channel.
//!
//! ## Delivery policy
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `topic` | `appointments` | Destination topic |
//! | `send_timeout` | 10s | Upper bound on each attempt |
//! | `max_retries` | 5 | Retries after the first attempt |
//!
//! Timeouts and connection failures are retried immediately until the budget
//! is spent. A rejection by the channel is not retried. The handler returns
//! only after an acknowledgment or a terminal error.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::ProducerConfig;
use crate::domain::appointment::Appointment;
use crate::ports::{ChannelError, DeliveryReceipt, EventChannel};

/// Configuration for the PublishAppointmentHandler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    pub topic: String,
    pub send_timeout: Duration,
    pub max_retries: u32,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            topic: "appointments".to_string(),
            send_timeout: Duration::from_secs(10),
            max_retries: 5,
        }
    }
}

impl PublisherConfig {
    /// Create config with a custom topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Create config with a custom per-attempt timeout.
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Create config with a custom retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Total attempts per appointment (first attempt plus retries).
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl From<&ProducerConfig> for PublisherConfig {
    fn from(config: &ProducerConfig) -> Self {
        Self {
            topic: config.topic.clone(),
            send_timeout: config.send_timeout(),
            max_retries: config.max_retries,
        }
    }
}

/// Errors that end delivery of an appointment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to serialize appointment: {0}")]
    Serialization(String),

    #[error("Channel rejected appointment after {attempts} attempt(s): {reason}")]
    Rejected { attempts: u32, reason: String },

    #[error("Delivery failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        last_error: ChannelError,
    },
}

impl PublishError {
    /// Attempts made before giving up (zero when nothing was sent).
    pub fn attempts(&self) -> u32 {
        match self {
            PublishError::Serialization(_) => 0,
            PublishError::Rejected { attempts, .. } => *attempts,
            PublishError::RetriesExhausted { attempts, .. } => *attempts,
        }
    }
}

/// Handler for publishing appointments with bounded retries.
pub struct PublishAppointmentHandler {
    channel: Arc<dyn EventChannel>,
    config: PublisherConfig,
}

impl PublishAppointmentHandler {
    /// Create a new handler with default configuration.
    pub fn new(channel: Arc<dyn EventChannel>) -> Self {
        Self::with_config(channel, PublisherConfig::default())
    }

    pub fn with_config(channel: Arc<dyn EventChannel>, config: PublisherConfig) -> Self {
        Self { channel, config }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Serializes the appointment and sends it until acknowledged.
    pub async fn handle(&self, appointment: &Appointment) -> Result<DeliveryReceipt, PublishError> {
        let payload = serde_json::to_vec(appointment)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        let event_id = appointment.id().as_str();
        let max_attempts = self.config.max_attempts();

        let mut attempt = 0;
        loop {
            attempt += 1;

            let outcome = match time::timeout(
                self.config.send_timeout,
                self.channel.send(&self.config.topic, event_id, &payload),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ChannelError::Timeout(self.config.send_timeout)),
            };

            match outcome {
                Ok(receipt) => {
                    tracing::debug!(
                        appointment_id = %event_id,
                        entry_id = %receipt.entry_id,
                        attempt,
                        "Appointment acknowledged"
                    );
                    return Ok(receipt);
                }
                Err(error) if error.is_transient() && attempt < max_attempts => {
                    tracing::warn!(
                        appointment_id = %event_id,
                        attempt,
                        max_attempts,
                        error = %error,
                        "Send attempt failed, retrying"
                    );
                }
                Err(error) if error.is_transient() => {
                    return Err(PublishError::RetriesExhausted {
                        attempts: attempt,
                        last_error: error,
                    });
                }
                Err(error) => {
                    return Err(PublishError::Rejected {
                        attempts: attempt,
                        reason: error.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::{InMemoryEventChannel, ScriptedSend};
    use crate::domain::appointment::AppointmentGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn appointment() -> Appointment {
        AppointmentGenerator::new(StdRng::seed_from_u64(7), crate::domain::foundation::SystemClock)
            .generate()
    }

    fn handler(channel: Arc<InMemoryEventChannel>) -> PublishAppointmentHandler {
        PublishAppointmentHandler::new(channel)
    }

    #[test]
    fn default_config_allows_six_attempts() {
        let config = PublisherConfig::default();
        assert_eq!(config.max_attempts(), 6);
        assert_eq!(config.topic, "appointments");
    }

    #[test]
    fn config_from_producer_settings() {
        let producer = ProducerConfig {
            topic: "clinic".to_string(),
            max_retries: 2,
            ..Default::default()
        };
        let config = PublisherConfig::from(&producer);
        assert_eq!(config.topic, "clinic");
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(config.send_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn publishes_json_keyed_by_appointment_id() {
        let channel = Arc::new(InMemoryEventChannel::new());
        let appointment = appointment();

        let receipt = handler(channel.clone()).handle(&appointment).await.unwrap();

        assert_eq!(receipt.topic, "appointments");
        let records = channel.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event_id, appointment.id().as_str());

        let json = records[0].payload_json().unwrap();
        assert_eq!(json["appointment_id"], appointment.id().as_str());
        assert_eq!(json["status"], appointment.status().as_str());
    }

    #[tokio::test(start_paused = true)]
    async fn four_timeouts_then_success_takes_five_attempts() {
        let channel = Arc::new(InMemoryEventChannel::new());
        channel.hang_next(4);

        let receipt = handler(channel.clone()).handle(&appointment()).await;

        assert!(receipt.is_ok());
        assert_eq!(channel.attempts(), 5);
        assert_eq!(channel.records().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn six_failures_exhaust_the_budget() {
        let channel = Arc::new(InMemoryEventChannel::new());
        channel.hang_next(6);

        let result = handler(channel.clone()).handle(&appointment()).await;

        match result {
            Err(PublishError::RetriesExhausted { attempts, last_error }) => {
                assert_eq!(attempts, 6);
                assert_eq!(last_error, ChannelError::Timeout(Duration::from_secs(10)));
            }
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
        assert_eq!(channel.attempts(), 6);
        assert!(channel.records().is_empty());
    }

    #[tokio::test]
    async fn connection_errors_are_retried() {
        let channel = Arc::new(InMemoryEventChannel::new());
        channel.fail_next(2, ChannelError::Connection("reset".into()));

        let result = handler(channel.clone()).handle(&appointment()).await;

        assert!(result.is_ok());
        assert_eq!(channel.attempts(), 3);
    }

    #[tokio::test]
    async fn rejection_is_not_retried() {
        let channel = Arc::new(InMemoryEventChannel::new());
        channel.script([ScriptedSend::Fail(ChannelError::Rejected("WRONGTYPE".into()))]);

        let result = handler(channel.clone()).handle(&appointment()).await;

        assert!(matches!(result, Err(PublishError::Rejected { attempts: 1, .. })));
        assert_eq!(channel.attempts(), 1);
    }

    #[tokio::test]
    async fn zero_retries_means_one_attempt() {
        let channel = Arc::new(InMemoryEventChannel::new());
        channel.fail_next(1, ChannelError::Connection("refused".into()));
        let handler = PublishAppointmentHandler::with_config(
            channel.clone(),
            PublisherConfig::default().with_max_retries(0),
        );

        let result = handler.handle(&appointment()).await;

        assert_eq!(result.unwrap_err().attempts(), 1);
        assert_eq!(channel.attempts(), 1);
    }
}
