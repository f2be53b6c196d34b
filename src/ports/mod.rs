//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EventChannel` - Durable message channel (publish/acknowledge)
//! - `AppointmentReader` - Store query surface ("recent rows, optional status filter")
//! - `DashboardRenderer` - Rendering surface for refresh cycles

mod appointment_reader;
mod dashboard_renderer;
mod event_channel;

pub use appointment_reader::{AppointmentReader, QueryError};
pub use dashboard_renderer::{DashboardRenderer, RenderError};
pub use event_channel::{ChannelError, DeliveryReceipt, EventChannel};
