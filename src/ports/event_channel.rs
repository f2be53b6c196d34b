//! EventChannel port - Interface to the durable message channel.
//!
//! The producer only relies on a publish/acknowledge contract: hand the
//! channel an encoded record for a topic and get back where it was durably
//! placed. Partitioning, replication and retention belong to the broker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Confirmation that the channel durably accepted a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Topic (stream) the record landed in.
    pub topic: String,
    /// Physical placement within the topic (partition/offset equivalent).
    pub entry_id: String,
    pub acknowledged_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    pub fn new(topic: impl Into<String>, entry_id: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            entry_id: entry_id.into(),
            acknowledged_at: Utc::now(),
        }
    }
}

impl fmt::Display for DeliveryReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.topic, self.entry_id)
    }
}

/// Errors reported by a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel connection failed: {0}")]
    Connection(String),

    #[error("Send timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Channel rejected record: {0}")]
    Rejected(String),
}

impl ChannelError {
    /// Transient failures may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChannelError::Connection(_) | ChannelError::Timeout(_))
    }
}

/// Port for sending encoded records to the channel.
///
/// Implementations must:
/// - Return only after the channel acknowledged persistence
/// - Report transport trouble as a transient [`ChannelError`]
/// - Not retry internally (retry policy belongs to the caller)
#[async_trait]
pub trait EventChannel: Send + Sync {
    /// Sends one record. `event_id` travels alongside the payload for
    /// downstream de-duplication; no partitioning key is set.
    async fn send(
        &self,
        topic: &str,
        event_id: &str,
        payload: &[u8],
    ) -> Result<DeliveryReceipt, ChannelError>;
}
