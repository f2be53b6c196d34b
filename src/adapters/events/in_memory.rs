//! In-memory event channel for testing.
//!
//! Records every accepted send and can be scripted to fail or hang on
//! upcoming attempts, so retry and timeout behavior can be exercised without
//! a broker. Lock poisoning panics.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::ports::{ChannelError, DeliveryReceipt, EventChannel};

/// Outcome forced onto one upcoming send attempt.
#[derive(Debug, Clone)]
pub enum ScriptedSend {
    /// Accept and record the payload.
    Deliver,
    /// Return this error without recording.
    Fail(ChannelError),
    /// Never complete; the caller's timeout has to end the attempt.
    Hang,
}

/// A record the channel acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRecord {
    pub topic: String,
    pub event_id: String,
    pub payload: Vec<u8>,
    pub entry_id: String,
}

impl PublishedRecord {
    /// Payload decoded as JSON (for test assertions).
    pub fn payload_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

/// In-memory channel with scripted failures.
///
/// Attempts beyond the script are delivered. Entry ids mimic stream ids
/// (`<seq>-0`) and increase with every delivery.
///
/// # Example
///
/// ```ignore
/// let channel = InMemoryEventChannel::new();
/// channel.script([ScriptedSend::Hang, ScriptedSend::Deliver]);
///
/// // First attempt hangs until the caller times out, second is recorded.
/// assert_eq!(channel.attempts(), 2);
/// assert_eq!(channel.records().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEventChannel {
    script: Mutex<VecDeque<ScriptedSend>>,
    records: Mutex<Vec<PublishedRecord>>,
    attempts: AtomicUsize,
    sequence: AtomicU64,
}

impl InMemoryEventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues outcomes for the next attempts, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn script(&self, outcomes: impl IntoIterator<Item = ScriptedSend>) {
        self.script
            .lock()
            .expect("InMemoryEventChannel: script lock poisoned")
            .extend(outcomes);
    }

    /// Makes the next `count` attempts fail with `error`.
    pub fn fail_next(&self, count: usize, error: ChannelError) {
        self.script(std::iter::repeat(ScriptedSend::Fail(error)).take(count));
    }

    /// Makes the next `count` attempts hang.
    pub fn hang_next(&self, count: usize) {
        self.script(std::iter::repeat(ScriptedSend::Hang).take(count));
    }

    // === Test Helpers ===

    /// Number of send attempts seen, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Returns all acknowledged records.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn records(&self) -> Vec<PublishedRecord> {
        self.records
            .lock()
            .expect("InMemoryEventChannel: records lock poisoned")
            .clone()
    }

    fn next_outcome(&self) -> ScriptedSend {
        self.script
            .lock()
            .expect("InMemoryEventChannel: script lock poisoned")
            .pop_front()
            .unwrap_or(ScriptedSend::Deliver)
    }
}

#[async_trait]
impl EventChannel for InMemoryEventChannel {
    async fn send(
        &self,
        topic: &str,
        event_id: &str,
        payload: &[u8],
    ) -> Result<DeliveryReceipt, ChannelError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        // Lock is released before any await point
        match self.next_outcome() {
            ScriptedSend::Deliver => {}
            ScriptedSend::Fail(error) => return Err(error),
            ScriptedSend::Hang => std::future::pending::<()>().await,
        }

        let entry_id = format!("{}-0", self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
        self.records
            .lock()
            .expect("InMemoryEventChannel: records lock poisoned")
            .push(PublishedRecord {
                topic: topic.to_string(),
                event_id: event_id.to_string(),
                payload: payload.to_vec(),
                entry_id: entry_id.clone(),
            });

        Ok(DeliveryReceipt::new(topic, entry_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn delivers_and_records_by_default() {
        let channel = InMemoryEventChannel::new();

        let receipt = channel
            .send("appointments", "a1b2c3d4", br#"{"appointment_id":"a1b2c3d4"}"#)
            .await
            .unwrap();

        assert_eq!(receipt.topic, "appointments");
        assert_eq!(receipt.entry_id, "1-0");
        assert_eq!(channel.attempts(), 1);

        let records = channel.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event_id, "a1b2c3d4");
        assert_eq!(records[0].payload_json().unwrap()["appointment_id"], "a1b2c3d4");
    }

    #[tokio::test]
    async fn entry_ids_increase() {
        let channel = InMemoryEventChannel::new();
        let first = channel.send("t", "a", b"{}").await.unwrap();
        let second = channel.send("t", "b", b"{}").await.unwrap();
        assert_eq!(first.entry_id, "1-0");
        assert_eq!(second.entry_id, "2-0");
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_in_order() {
        let channel = InMemoryEventChannel::new();
        channel.fail_next(2, ChannelError::Connection("reset".into()));

        assert!(channel.send("t", "a", b"{}").await.is_err());
        assert!(channel.send("t", "a", b"{}").await.is_err());
        assert!(channel.send("t", "a", b"{}").await.is_ok());

        assert_eq!(channel.attempts(), 3);
        assert_eq!(channel.records().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hang_never_completes() {
        let channel = InMemoryEventChannel::new();
        channel.hang_next(1);

        let result =
            tokio::time::timeout(Duration::from_secs(10), channel.send("t", "a", b"{}")).await;

        assert!(result.is_err());
        assert_eq!(channel.attempts(), 1);
        assert!(channel.records().is_empty());
    }
}
