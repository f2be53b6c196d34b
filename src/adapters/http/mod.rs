//! HTTP adapters - REST API implementations.

pub mod dashboard;

pub use dashboard::{dashboard_routes, DashboardAppState};

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Full operator API with request tracing and a per-request timeout.
pub fn api_router(state: DashboardAppState, request_timeout: Duration) -> Router {
    dashboard_routes(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
