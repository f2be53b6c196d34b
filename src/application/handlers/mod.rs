//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod dashboard;
pub mod producer;

pub use dashboard::{
    DashboardControlsHandle, FetchDatasetHandler, FetchDatasetQuery, FetchDatasetResult,
    RefreshLoop,
};
pub use producer::{
    JitterPacer, ProducerLoop, PublishAppointmentHandler, PublishError, PublisherConfig,
};
