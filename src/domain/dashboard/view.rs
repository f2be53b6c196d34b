//! Presenter view model: what one refresh cycle hands to the renderers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::rollup::{aggregate, Rollup};
use super::{AppointmentRow, DashboardControls, Dataset, StatusFilter};

/// Notice shown while the store has no matching rows.
pub const WAITING_NOTICE: &str = "No records found. Waiting for data...";

/// Rendered when the last fetch returned zero rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitingView {
    pub notice: String,
    /// Present when the fetch failed rather than came back empty.
    pub diagnostic: Option<String>,
    pub status_filter: StatusFilter,
    pub rendered_at: DateTime<Utc>,
    pub refresh_interval_secs: u64,
}

/// Rendered when the last fetch returned at least one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayView {
    pub status_filter: StatusFilter,
    pub row_count: usize,
    pub rollup: Rollup,
    pub preview: Vec<AppointmentRow>,
    pub rendered_at: DateTime<Utc>,
    pub refresh_interval_secs: u64,
}

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardState {
    Waiting(WaitingView),
    Displaying(DisplayView),
}

impl DashboardState {
    /// Builds the state for a fetched dataset.
    ///
    /// An empty dataset (with or without a diagnostic) yields `Waiting`;
    /// otherwise the dataset is aggregated into `Displaying`.
    pub fn from_dataset(
        controls: &DashboardControls,
        dataset: &Dataset,
        diagnostic: Option<String>,
        preview_rows: usize,
        rendered_at: DateTime<Utc>,
    ) -> Self {
        if dataset.is_empty() {
            return DashboardState::Waiting(WaitingView {
                notice: WAITING_NOTICE.to_string(),
                diagnostic,
                status_filter: controls.status_filter,
                rendered_at,
                refresh_interval_secs: controls.refresh_interval_secs,
            });
        }

        DashboardState::Displaying(DisplayView {
            status_filter: controls.status_filter,
            row_count: dataset.len(),
            rollup: aggregate(dataset),
            preview: dataset.preview(preview_rows),
            rendered_at,
            refresh_interval_secs: controls.refresh_interval_secs,
        })
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, DashboardState::Waiting(_))
    }

    pub fn rendered_at(&self) -> DateTime<Utc> {
        match self {
            DashboardState::Waiting(view) => view.rendered_at,
            DashboardState::Displaying(view) => view.rendered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::{AppointmentId, AppointmentStatus};

    fn rows(n: usize) -> Dataset {
        (0..n)
            .map(|i| AppointmentRow {
                appointment_id: AppointmentId::from_string(format!("row{}", i)),
                status: AppointmentStatus::Completed,
                department: "Pediatrics".to_string(),
                urgency: "Medium".to_string(),
                city: "Seattle".to_string(),
                payment_method: "Insurance".to_string(),
                cost: 100.0,
                base_cost: None,
                copay: Some(10.0),
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn empty_dataset_waits_with_notice() {
        let now = Utc::now();
        let state = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            None,
            10,
            now,
        );

        match state {
            DashboardState::Waiting(view) => {
                assert_eq!(view.notice, WAITING_NOTICE);
                assert!(view.diagnostic.is_none());
                assert_eq!(view.rendered_at, now);
                assert_eq!(view.refresh_interval_secs, 5);
            }
            other => panic!("expected waiting, got {:?}", other),
        }
    }

    #[test]
    fn failed_fetch_waits_with_diagnostic() {
        let state = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            Some("connection refused".to_string()),
            10,
            Utc::now(),
        );

        match state {
            DashboardState::Waiting(view) => {
                assert_eq!(view.diagnostic.as_deref(), Some("connection refused"));
            }
            other => panic!("expected waiting, got {:?}", other),
        }
    }

    #[test]
    fn populated_dataset_displays_rollup_and_capped_preview() {
        let dataset = rows(25);
        let state = DashboardState::from_dataset(
            &DashboardControls::default(),
            &dataset,
            None,
            10,
            Utc::now(),
        );

        match state {
            DashboardState::Displaying(view) => {
                assert_eq!(view.row_count, 25);
                assert_eq!(view.preview.len(), 10);
                assert_eq!(view.rollup.kpis.total_appointments, 25);
                assert!(view.rollup.trend.is_empty());
            }
            other => panic!("expected displaying, got {:?}", other),
        }
    }

    #[test]
    fn serializes_with_state_tag() {
        let state = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            None,
            10,
            Utc::now(),
        );

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "waiting");
        assert_eq!(json["status_filter"], "All");
    }
}
