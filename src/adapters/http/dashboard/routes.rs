//! HTTP routes for dashboard endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_controls, get_dashboard, health, request_refresh, update_controls, DashboardAppState,
};

/// Creates the dashboard router with all routes.
pub fn dashboard_routes(state: DashboardAppState) -> Router {
    Router::new()
        // GET /health
        .route("/health", get(health))
        // GET /api/dashboard
        .route("/api/dashboard", get(get_dashboard))
        // GET|PUT /api/dashboard/controls
        .route(
            "/api/dashboard/controls",
            get(get_controls).put(update_controls),
        )
        // POST /api/dashboard/refresh
        .route("/api/dashboard/refresh", post(request_refresh))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::render::SnapshotRenderer;
    use crate::application::handlers::DashboardControlsHandle;
    use crate::domain::dashboard::{ControlBounds, DashboardControls, DashboardState, Dataset};
    use crate::ports::DashboardRenderer;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_state() -> DashboardAppState {
        DashboardAppState::new(
            Arc::new(SnapshotRenderer::new()),
            DashboardControlsHandle::new(DashboardControls::default(), ControlBounds::default())
                .unwrap(),
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn put_controls(body: &str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/api/dashboard/controls")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = dashboard_routes(app_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_is_unavailable_before_first_cycle() {
        let response = dashboard_routes(app_state())
            .oneshot(Request::builder().uri("/api/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn dashboard_returns_latest_state() {
        let state = app_state();
        let rendered = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            None,
            10,
            chrono::Utc::now(),
        );
        state.snapshots.render(&rendered).await.unwrap();

        let response = dashboard_routes(state)
            .oneshot(Request::builder().uri("/api/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["state"], "waiting");
        assert_eq!(json["notice"], "No records found. Waiting for data...");
    }

    #[tokio::test]
    async fn put_controls_applies_partial_update() {
        let state = app_state();
        let controls = state.controls.clone();

        let response = dashboard_routes(state)
            .oneshot(put_controls(r#"{"status_filter":"Cancelled","row_limit":500}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["controls"]["status_filter"], "Cancelled");
        assert_eq!(json["controls"]["row_limit"], 500);
        assert_eq!(json["controls"]["refresh_interval_secs"], 5);
        assert_eq!(controls.current().row_limit, 500);
    }

    #[tokio::test]
    async fn put_controls_rejects_out_of_range_values() {
        let state = app_state();
        let controls = state.controls.clone();

        let response = dashboard_routes(state)
            .oneshot(put_controls(r#"{"refresh_interval_secs":1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_FAILED");
        assert_eq!(json["details"]["field"], "refresh_interval_secs");
        assert_eq!(controls.current(), DashboardControls::default());
    }

    #[tokio::test]
    async fn put_controls_rejects_unknown_status() {
        let response = dashboard_routes(app_state())
            .oneshot(put_controls(r#"{"status_filter":"Pending"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_is_accepted() {
        let response = dashboard_routes(app_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/dashboard/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
