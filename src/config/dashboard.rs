//! Dashboard configuration: initial controls, their bounds, and presentation

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dashboard::{ControlBounds, DashboardControls, StatusFilter};

const MAX_PREVIEW_ROWS: usize = 100;

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Initial status filter ("All" or a status label)
    #[serde(default)]
    pub default_status: StatusFilter,

    #[serde(default = "default_row_limit")]
    pub default_row_limit: u32,

    #[serde(default = "default_row_limit_min")]
    pub row_limit_min: u32,

    #[serde(default = "default_row_limit_max")]
    pub row_limit_max: u32,

    #[serde(default = "default_row_limit_step")]
    pub row_limit_step: u32,

    #[serde(default = "default_refresh_secs")]
    pub default_refresh_secs: u64,

    #[serde(default = "default_refresh_min")]
    pub refresh_min_secs: u64,

    #[serde(default = "default_refresh_max")]
    pub refresh_max_secs: u64,

    /// Rows shown in the raw-data preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Print each cycle to stdout
    #[serde(default = "default_terminal_output")]
    pub terminal_output: bool,
}

impl DashboardConfig {
    pub fn bounds(&self) -> ControlBounds {
        ControlBounds {
            row_limit_min: self.row_limit_min,
            row_limit_max: self.row_limit_max,
            row_limit_step: self.row_limit_step,
            refresh_min_secs: self.refresh_min_secs,
            refresh_max_secs: self.refresh_max_secs,
        }
    }

    /// The controls the dashboard starts with.
    pub fn initial_controls(&self) -> Result<DashboardControls, ValidationError> {
        let bounds = self.bounds();
        bounds.validate()?;
        let controls = DashboardControls::new(
            self.default_status,
            self.default_row_limit,
            self.default_refresh_secs,
            &bounds,
        )?;
        Ok(controls)
    }

    /// Validate dashboard configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.initial_controls()?;
        if self.preview_rows == 0 || self.preview_rows > MAX_PREVIEW_ROWS {
            return Err(ValidationError::InvalidPreviewRows);
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_status: StatusFilter::All,
            default_row_limit: default_row_limit(),
            row_limit_min: default_row_limit_min(),
            row_limit_max: default_row_limit_max(),
            row_limit_step: default_row_limit_step(),
            default_refresh_secs: default_refresh_secs(),
            refresh_min_secs: default_refresh_min(),
            refresh_max_secs: default_refresh_max(),
            preview_rows: default_preview_rows(),
            terminal_output: default_terminal_output(),
        }
    }
}

fn default_row_limit() -> u32 {
    200
}

fn default_row_limit_min() -> u32 {
    50
}

fn default_row_limit_max() -> u32 {
    2_000
}

fn default_row_limit_step() -> u32 {
    50
}

fn default_refresh_secs() -> u64 {
    5
}

fn default_refresh_min() -> u64 {
    2
}

fn default_refresh_max() -> u64 {
    20
}

fn default_preview_rows() -> usize {
    10
}

fn default_terminal_output() -> bool {
    true
}
