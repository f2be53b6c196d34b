//! Dashboard query handlers.
//!
//! Fetching the dataset, the shared operator controls, and the refresh loop
//! that ties them to the renderers.

mod controls_handle;
mod fetch_dataset;
mod refresh_loop;

pub use controls_handle::DashboardControlsHandle;
pub use fetch_dataset::{FetchDatasetHandler, FetchDatasetQuery, FetchDatasetResult};
pub use refresh_loop::{RefreshLoop, DEFAULT_PREVIEW_ROWS};
