//! Dashboard module - datasets, rollups and the presenter view model.

pub mod controls;
pub mod dataset;
pub mod rollup;
pub mod trend;
pub mod view;

pub use controls::{ControlBounds, ControlsUpdate, DashboardControls, StatusFilter};
pub use dataset::{AppointmentRow, Dataset};
pub use rollup::{
    aggregate, Kpis, PaymentMethodRow, Rollup, StatusMixRow, UrgencyByDepartmentRow,
};
pub use trend::{minute_trend, TrendBucket, MAX_FILLED_TREND_BUCKETS};
pub use view::{DashboardState, DisplayView, WaitingView, WAITING_NOTICE};
