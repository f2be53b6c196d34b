//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event channel implementations (Redis Streams, in-memory)
//! - `postgres` - Appointment store queries
//! - `storage` - In-memory appointment store
//! - `render` - Terminal, snapshot and fan-out renderers
//! - `http` - Operator API

pub mod events;
pub mod http;
pub mod postgres;
pub mod render;
pub mod storage;

pub use events::{InMemoryEventChannel, RedisStreamChannel};
pub use postgres::PostgresAppointmentReader;
pub use render::{FanoutRenderer, SnapshotRenderer, TerminalRenderer};
pub use storage::InMemoryAppointmentStore;
