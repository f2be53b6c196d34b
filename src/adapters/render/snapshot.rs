//! Keeps the latest rendered state for the operator API.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::dashboard::DashboardState;
use crate::ports::{DashboardRenderer, RenderError};

/// Latest-value holder; readers never block the refresh loop.
#[derive(Debug)]
pub struct SnapshotRenderer {
    latest: watch::Sender<Option<DashboardState>>,
}

impl SnapshotRenderer {
    pub fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self { latest }
    }

    /// The most recent state, or `None` before the first cycle.
    pub fn latest(&self) -> Option<DashboardState> {
        self.latest.borrow().clone()
    }

    /// Receiver that is notified after every cycle.
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardState>> {
        self.latest.subscribe()
    }
}

impl Default for SnapshotRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardRenderer for SnapshotRenderer {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn render(&self, state: &DashboardState) -> Result<(), RenderError> {
        self.latest.send_replace(Some(state.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{DashboardControls, Dataset};
    use chrono::Utc;

    #[tokio::test]
    async fn keeps_only_the_latest_state() {
        let renderer = SnapshotRenderer::new();
        assert!(renderer.latest().is_none());

        let first = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            None,
            10,
            Utc::now(),
        );
        let second = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            Some("timeout".to_string()),
            10,
            Utc::now(),
        );

        renderer.render(&first).await.unwrap();
        renderer.render(&second).await.unwrap();

        assert_eq!(renderer.latest(), Some(second));
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let renderer = SnapshotRenderer::new();
        let mut updates = renderer.subscribe();

        let state = DashboardState::from_dataset(
            &DashboardControls::default(),
            &Dataset::empty(),
            None,
            10,
            Utc::now(),
        );
        renderer.render(&state).await.unwrap();

        updates.changed().await.unwrap();
        assert!(updates.borrow().is_some());
    }
}
