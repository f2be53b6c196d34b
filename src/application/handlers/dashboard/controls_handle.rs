//! Shared handle to the operator controls and the manual refresh trigger.

use std::sync::Arc;

use tokio::sync::{watch, Notify};

use crate::domain::dashboard::{ControlBounds, ControlsUpdate, DashboardControls};
use crate::domain::foundation::ValidationError;

/// Cloneable handle shared by the refresh loop and the operator API.
///
/// A controls change or a refresh request wakes the refresh loop from its
/// sleep. Refresh requests raised while a cycle is running collapse into a
/// single follow-up cycle.
#[derive(Debug, Clone)]
pub struct DashboardControlsHandle {
    controls: Arc<watch::Sender<DashboardControls>>,
    refresh: Arc<Notify>,
    bounds: ControlBounds,
}

impl DashboardControlsHandle {
    /// Validates `bounds` and `initial` before sharing them.
    pub fn new(initial: DashboardControls, bounds: ControlBounds) -> Result<Self, ValidationError> {
        bounds.validate()?;
        let initial = DashboardControls::new(
            initial.status_filter,
            initial.row_limit,
            initial.refresh_interval_secs,
            &bounds,
        )?;
        let (controls, _) = watch::channel(initial);
        Ok(Self {
            controls: Arc::new(controls),
            refresh: Arc::new(Notify::new()),
            bounds,
        })
    }

    pub fn current(&self) -> DashboardControls {
        *self.controls.borrow()
    }

    pub fn bounds(&self) -> ControlBounds {
        self.bounds
    }

    /// Applies a partial update; invalid updates leave the controls as they were.
    pub fn update(&self, update: &ControlsUpdate) -> Result<DashboardControls, ValidationError> {
        let next = update.apply(&self.current(), &self.bounds)?;
        self.controls.send_replace(next);
        tracing::info!(
            filter = %next.status_filter,
            row_limit = next.row_limit,
            refresh_interval_secs = next.refresh_interval_secs,
            "Dashboard controls updated"
        );
        Ok(next)
    }

    /// Requests a refresh now instead of waiting out the interval.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<DashboardControls> {
        self.controls.subscribe()
    }

    pub(crate) fn refresh_trigger(&self) -> Arc<Notify> {
        Arc::clone(&self.refresh)
    }
}
