//! Dashboard HTTP adapter module.
//!
//! Operator API: latest dashboard state, controls, and manual refresh.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ControlsResponse, ErrorResponse};
pub use handlers::DashboardAppState;
pub use routes::dashboard_routes;
