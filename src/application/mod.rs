//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! the producer side publishes generated appointments, the dashboard side
//! reads them back and renders rollups.

pub mod handlers;

pub use handlers::{
    // Dashboard
    DashboardControlsHandle, FetchDatasetHandler, FetchDatasetQuery, FetchDatasetResult,
    RefreshLoop,
    // Producer
    JitterPacer, ProducerLoop, PublishAppointmentHandler, PublishError, PublisherConfig,
};
