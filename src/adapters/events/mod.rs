//! Event channel adapters.
//!
//! - `RedisStreamChannel` - Redis Streams, used by the producer binary
//! - `InMemoryEventChannel` - Recording channel with scripted failures for tests

mod in_memory;
mod redis_stream;

pub use in_memory::{InMemoryEventChannel, PublishedRecord, ScriptedSend};
pub use redis_stream::RedisStreamChannel;
