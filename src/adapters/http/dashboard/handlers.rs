//! HTTP handlers for dashboard endpoints.
//!
//! These handlers connect Axum routes to the snapshot renderer and the shared
//! controls handle.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::render::SnapshotRenderer;
use crate::application::handlers::DashboardControlsHandle;
use crate::domain::foundation::ValidationError;

use super::dto::{ControlsResponse, ControlsUpdate, DashboardState, ErrorResponse, RefreshAccepted};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Dashboard API error that implements IntoResponse.
#[derive(Debug)]
pub enum DashboardApiError {
    BadRequest(String),
    Validation(ValidationError),
    NotReady,
}

impl IntoResponse for DashboardApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            DashboardApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            DashboardApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::validation_failed(err.field(), err.to_string()),
            ),
            DashboardApiError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::not_ready("Dashboard has not completed its first refresh"),
            ),
        };
        (status, Json(error)).into_response()
    }
}

impl From<ValidationError> for DashboardApiError {
    fn from(error: ValidationError) -> Self {
        DashboardApiError::Validation(error)
    }
}

impl From<JsonRejection> for DashboardApiError {
    fn from(rejection: JsonRejection) -> Self {
        DashboardApiError::BadRequest(rejection.body_text())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing dashboard dependencies.
#[derive(Clone)]
pub struct DashboardAppState {
    pub snapshots: Arc<SnapshotRenderer>,
    pub controls: DashboardControlsHandle,
}

impl DashboardAppState {
    pub fn new(snapshots: Arc<SnapshotRenderer>, controls: DashboardControlsHandle) -> Self {
        Self {
            snapshots,
            controls,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /api/dashboard
///
/// Latest rendered state; 503 until the first cycle completes.
pub async fn get_dashboard(
    State(state): State<DashboardAppState>,
) -> Result<Json<DashboardState>, DashboardApiError> {
    state
        .snapshots
        .latest()
        .map(Json)
        .ok_or(DashboardApiError::NotReady)
}

/// GET /api/dashboard/controls
pub async fn get_controls(State(state): State<DashboardAppState>) -> Json<ControlsResponse> {
    Json(ControlsResponse::new(
        state.controls.current(),
        state.controls.bounds(),
    ))
}

/// PUT /api/dashboard/controls
///
/// Partial update; the refresh loop picks the change up immediately.
pub async fn update_controls(
    State(state): State<DashboardAppState>,
    body: Result<Json<ControlsUpdate>, JsonRejection>,
) -> Result<Json<ControlsResponse>, DashboardApiError> {
    let Json(update) = body?;
    let controls = state.controls.update(&update)?;
    Ok(Json(ControlsResponse::new(controls, state.controls.bounds())))
}

/// POST /api/dashboard/refresh
pub async fn request_refresh(State(state): State<DashboardAppState>) -> impl IntoResponse {
    state.controls.refresh_now();
    (StatusCode::ACCEPTED, Json(RefreshAccepted::default()))
}
