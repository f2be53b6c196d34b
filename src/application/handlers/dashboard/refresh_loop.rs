//! RefreshLoop - fetch, aggregate, render, sleep.
//!
//! Each cycle reads the controls once, so a change made mid-cycle applies to
//! the next one. The sleep between cycles ends early on a controls change, a
//! manual refresh request, or shutdown.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time;

use super::controls_handle::DashboardControlsHandle;
use super::fetch_dataset::{FetchDatasetHandler, FetchDatasetQuery};
use crate::domain::dashboard::{DashboardControls, DashboardState};
use crate::domain::foundation::{Clock, SystemClock};
use crate::ports::{AppointmentReader, DashboardRenderer};

/// Preview rows shown when not configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Foreground dashboard loop.
pub struct RefreshLoop {
    fetch: FetchDatasetHandler,
    renderer: Arc<dyn DashboardRenderer>,
    controls: DashboardControlsHandle,
    clock: Arc<dyn Clock>,
    preview_rows: usize,
}

impl RefreshLoop {
    pub fn new(
        reader: Arc<dyn AppointmentReader>,
        renderer: Arc<dyn DashboardRenderer>,
        controls: DashboardControlsHandle,
    ) -> Self {
        Self {
            fetch: FetchDatasetHandler::new(reader),
            renderer,
            controls,
            clock: Arc::new(SystemClock),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Runs one cycle with the given controls and renders the result.
    ///
    /// Render failures are logged; the state is returned either way.
    pub async fn run_cycle(&self, controls: &DashboardControls) -> DashboardState {
        let fetched = self
            .fetch
            .handle(FetchDatasetQuery {
                status_filter: controls.status_filter,
                limit: controls.row_limit,
            })
            .await;

        let state = DashboardState::from_dataset(
            controls,
            &fetched.dataset,
            fetched.diagnostic,
            self.preview_rows,
            self.clock.now(),
        );

        if let Err(error) = self.renderer.render(&state).await {
            tracing::warn!(renderer = self.renderer.name(), error = %error, "Render failed");
        }

        state
    }

    /// Runs cycles until shutdown. Returns the number of completed cycles.
    ///
    /// # Arguments
    ///
    /// * `shutdown` - Watch channel that signals when to stop; a dropped
    ///   sender also stops the loop.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut controls_rx = self.controls.subscribe();
        let trigger = self.controls.refresh_trigger();
        let mut cycles = 0u64;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let controls = *controls_rx.borrow_and_update();
            let state = self.run_cycle(&controls).await;
            cycles += 1;
            tracing::debug!(
                cycle = cycles,
                filter = %controls.status_filter,
                row_limit = controls.row_limit,
                waiting = state.is_waiting(),
                "Dashboard refreshed"
            );

            tokio::select! {
                _ = time::sleep(controls.refresh_interval()) => {}
                _ = trigger.notified() => {
                    tracing::debug!("Manual refresh requested");
                }
                // Never errors: self.controls owns the sender
                _ = controls_rx.changed() => {
                    tracing::debug!("Controls changed, refreshing");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!(cycles, "Dashboard refresh loop stopped");
        cycles
    }
}
