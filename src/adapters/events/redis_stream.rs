//! Redis Streams implementation of the event channel.
//!
//! Each record becomes one stream entry (`XADD <topic> MAXLEN ~ n *`) with
//! two fields: `event_id` and `payload` (the JSON document). Redis replies
//! only after the entry is written, and the returned entry id is the
//! placement handed back in the [`DeliveryReceipt`].

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::streams::StreamMaxlen;
use redis::{AsyncCommands, RedisError};

use crate::config::RedisConfig;
use crate::ports::{ChannelError, DeliveryReceipt, EventChannel};

/// "Let the server assign the id."
const STREAM_ID_NEW: &str = "*";
const EVENT_ID_FIELD: &str = "event_id";
const PAYLOAD_FIELD: &str = "payload";

/// Event channel backed by a multiplexed Redis connection.
#[derive(Clone)]
pub struct RedisStreamChannel {
    connection: MultiplexedConnection,
    max_len: usize,
}

impl RedisStreamChannel {
    /// Connects and verifies the server answers `PING`.
    ///
    /// The whole handshake is bounded by the configured timeout.
    pub async fn connect(config: &RedisConfig, max_len: usize) -> Result<Self, ChannelError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| ChannelError::Connection(e.to_string()))?;

        let handshake = async {
            let mut connection = client.get_multiplexed_tokio_connection().await?;
            redis::cmd("PING")
                .query_async::<_, String>(&mut connection)
                .await?;
            Ok::<_, RedisError>(connection)
        };

        let connection = tokio::time::timeout(config.timeout(), handshake)
            .await
            .map_err(|_| ChannelError::Timeout(config.timeout()))?
            .map_err(classify)?;

        tracing::info!(max_len, "Connected to Redis event channel");
        Ok(Self {
            connection,
            max_len,
        })
    }
}

#[async_trait]
impl EventChannel for RedisStreamChannel {
    async fn send(
        &self,
        topic: &str,
        event_id: &str,
        payload: &[u8],
    ) -> Result<DeliveryReceipt, ChannelError> {
        let mut connection = self.connection.clone();
        let fields: [(&str, &[u8]); 2] = [
            (EVENT_ID_FIELD, event_id.as_bytes()),
            (PAYLOAD_FIELD, payload),
        ];

        let entry_id = connection
            .xadd_maxlen::<_, _, _, _, String>(
                topic,
                StreamMaxlen::Approx(self.max_len),
                STREAM_ID_NEW,
                &fields[..],
            )
            .await
            .map_err(classify)?;

        Ok(DeliveryReceipt::new(topic, entry_id))
    }
}

/// Transport trouble is transient; anything the server answered with is not.
fn classify(err: RedisError) -> ChannelError {
    if err.is_io_error()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
        || err.is_timeout()
    {
        ChannelError::Connection(err.to_string())
    } else {
        ChannelError::Rejected(err.to_string())
    }
}
