//! HTTP DTOs for dashboard endpoints.
//!
//! The domain view models are already designed for serialization,
//! so we re-export them directly.

pub use crate::domain::dashboard::{ControlBounds, ControlsUpdate, DashboardControls, DashboardState};

use serde::Serialize;

use crate::domain::dashboard::StatusFilter;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Current controls with the allowed ranges and filter options.
#[derive(Debug, Clone, Serialize)]
pub struct ControlsResponse {
    pub controls: DashboardControls,
    pub bounds: ControlBounds,
    pub status_options: Vec<StatusFilter>,
}

impl ControlsResponse {
    pub fn new(controls: DashboardControls, bounds: ControlBounds) -> Self {
        Self {
            controls,
            bounds,
            status_options: StatusFilter::options(),
        }
    }
}

/// Acknowledgment for a manual refresh request.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshAccepted {
    pub refresh: &'static str,
}

impl Default for RefreshAccepted {
    fn default() -> Self {
        Self { refresh: "scheduled" }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation_failed(field: &str, message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: message.into(),
            details: Some(serde_json::json!({ "field": field })),
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_READY".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
