//! Operator-facing dashboard controls and their bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::foundation::ValidationError;

const ALL_LABEL: &str = "All";

/// Which statuses the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    /// Every selectable option: "All" followed by each status.
    pub fn options() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(AppointmentStatus::ALL.iter().copied().map(StatusFilter::Only))
            .collect()
    }

    /// The status to filter on, or `None` for no filter.
    pub fn as_status(&self) -> Option<AppointmentStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL_LABEL),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(StatusFilter::All);
        }
        s.parse::<AppointmentStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| {
                ValidationError::invalid_format("status_filter", format!("unknown status '{}'", s))
            })
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Allowed ranges for the operator controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBounds {
    pub row_limit_min: u32,
    pub row_limit_max: u32,
    pub row_limit_step: u32,
    pub refresh_min_secs: u64,
    pub refresh_max_secs: u64,
}

impl Default for ControlBounds {
    fn default() -> Self {
        Self {
            row_limit_min: 50,
            row_limit_max: 2_000,
            row_limit_step: 50,
            refresh_min_secs: 2,
            refresh_max_secs: 20,
        }
    }
}

impl ControlBounds {
    /// Checks that the bounds themselves are usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.row_limit_min == 0 {
            return Err(ValidationError::out_of_range(
                "row_limit_min",
                1,
                i64::from(self.row_limit_max),
                0,
            ));
        }
        if self.row_limit_min > self.row_limit_max {
            return Err(ValidationError::invalid_format(
                "row_limit_min",
                "must not exceed row_limit_max",
            ));
        }
        if self.row_limit_step == 0 {
            return Err(ValidationError::invalid_format("row_limit_step", "must be positive"));
        }
        if self.refresh_min_secs == 0 {
            return Err(ValidationError::invalid_format("refresh_min_secs", "must be positive"));
        }
        if self.refresh_min_secs > self.refresh_max_secs {
            return Err(ValidationError::invalid_format(
                "refresh_min_secs",
                "must not exceed refresh_max_secs",
            ));
        }
        Ok(())
    }

    /// Checks a row limit against the range and step (counted from the minimum).
    pub fn check_row_limit(&self, row_limit: u32) -> Result<(), ValidationError> {
        if row_limit < self.row_limit_min || row_limit > self.row_limit_max {
            return Err(ValidationError::out_of_range(
                "row_limit",
                i64::from(self.row_limit_min),
                i64::from(self.row_limit_max),
                i64::from(row_limit),
            ));
        }
        if (row_limit - self.row_limit_min) % self.row_limit_step != 0 {
            return Err(ValidationError::invalid_format(
                "row_limit",
                format!("must be a multiple of {} from {}", self.row_limit_step, self.row_limit_min),
            ));
        }
        Ok(())
    }

    /// Checks a refresh interval against the range.
    pub fn check_refresh_interval(&self, secs: u64) -> Result<(), ValidationError> {
        if secs < self.refresh_min_secs || secs > self.refresh_max_secs {
            return Err(ValidationError::out_of_range(
                "refresh_interval_secs",
                self.refresh_min_secs as i64,
                self.refresh_max_secs as i64,
                secs.min(i64::MAX as u64) as i64,
            ));
        }
        Ok(())
    }
}

/// Current operator configuration, read at the start of every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardControls {
    pub status_filter: StatusFilter,
    pub row_limit: u32,
    pub refresh_interval_secs: u64,
}

impl Default for DashboardControls {
    fn default() -> Self {
        Self {
            status_filter: StatusFilter::All,
            row_limit: 200,
            refresh_interval_secs: 5,
        }
    }
}

impl DashboardControls {
    /// Builds controls, rejecting values outside `bounds`.
    pub fn new(
        status_filter: StatusFilter,
        row_limit: u32,
        refresh_interval_secs: u64,
        bounds: &ControlBounds,
    ) -> Result<Self, ValidationError> {
        bounds.check_row_limit(row_limit)?;
        bounds.check_refresh_interval(refresh_interval_secs)?;
        Ok(Self {
            status_filter,
            row_limit,
            refresh_interval_secs,
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Partial change to the controls; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ControlsUpdate {
    #[serde(default)]
    pub status_filter: Option<StatusFilter>,
    #[serde(default)]
    pub row_limit: Option<u32>,
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

impl ControlsUpdate {
    /// Applies the update on top of `current`, validating the result.
    pub fn apply(
        &self,
        current: &DashboardControls,
        bounds: &ControlBounds,
    ) -> Result<DashboardControls, ValidationError> {
        DashboardControls::new(
            self.status_filter.unwrap_or(current.status_filter),
            self.row_limit.unwrap_or(current.row_limit),
            self.refresh_interval_secs
                .unwrap_or(current.refresh_interval_secs),
            bounds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_list_all_then_statuses() {
        let options = StatusFilter::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], StatusFilter::All);
        assert_eq!(options[4], StatusFilter::Only(AppointmentStatus::NoShow));
    }

    #[test]
    fn status_filter_parses_labels() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Cancelled".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AppointmentStatus::Cancelled)
        );
        assert!("Pending".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn status_filter_serializes_as_label() {
        let json = serde_json::to_string(&StatusFilter::Only(AppointmentStatus::NoShow)).unwrap();
        assert_eq!(json, "\"No-Show\"");

        let parsed: StatusFilter = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(parsed, StatusFilter::All);
        assert!(serde_json::from_str::<StatusFilter>("\"Nope\"").is_err());
    }

    #[test]
    fn as_status_maps_all_to_none() {
        assert_eq!(StatusFilter::All.as_status(), None);
        assert_eq!(
            StatusFilter::Only(AppointmentStatus::Completed).as_status(),
            Some(AppointmentStatus::Completed)
        );
    }

    #[test]
    fn defaults_are_within_default_bounds() {
        let bounds = ControlBounds::default();
        let controls = DashboardControls::default();

        assert!(bounds.validate().is_ok());
        assert!(bounds.check_row_limit(controls.row_limit).is_ok());
        assert!(bounds.check_refresh_interval(controls.refresh_interval_secs).is_ok());
        assert_eq!(controls.refresh_interval(), Duration::from_secs(5));
    }

    #[test]
    fn row_limit_bounds_and_step_are_enforced() {
        let bounds = ControlBounds::default();

        assert!(bounds.check_row_limit(50).is_ok());
        assert!(bounds.check_row_limit(2_000).is_ok());
        assert!(bounds.check_row_limit(450).is_ok());
        assert!(matches!(
            bounds.check_row_limit(25),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            bounds.check_row_limit(2_050),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            bounds.check_row_limit(75),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn refresh_interval_bounds_are_enforced() {
        let bounds = ControlBounds::default();

        assert!(bounds.check_refresh_interval(2).is_ok());
        assert!(bounds.check_refresh_interval(20).is_ok());
        assert!(bounds.check_refresh_interval(1).is_err());
        assert!(bounds.check_refresh_interval(21).is_err());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let inverted = ControlBounds {
            row_limit_min: 500,
            row_limit_max: 100,
            ..ControlBounds::default()
        };
        assert!(inverted.validate().is_err());

        let zero_step = ControlBounds {
            row_limit_step: 0,
            ..ControlBounds::default()
        };
        assert!(zero_step.validate().is_err());

        let zero_refresh = ControlBounds {
            refresh_min_secs: 0,
            ..ControlBounds::default()
        };
        assert!(zero_refresh.validate().is_err());
    }

    #[test]
    fn update_keeps_unset_fields() {
        let bounds = ControlBounds::default();
        let current = DashboardControls::default();
        let update = ControlsUpdate {
            row_limit: Some(1_000),
            ..ControlsUpdate::default()
        };

        let next = update.apply(&current, &bounds).unwrap();

        assert_eq!(next.row_limit, 1_000);
        assert_eq!(next.status_filter, current.status_filter);
        assert_eq!(next.refresh_interval_secs, current.refresh_interval_secs);
    }

    #[test]
    fn update_rejects_out_of_bounds_values() {
        let bounds = ControlBounds::default();
        let update = ControlsUpdate {
            refresh_interval_secs: Some(60),
            ..ControlsUpdate::default()
        };

        let err = update.apply(&DashboardControls::default(), &bounds).unwrap_err();
        assert_eq!(err.field(), "refresh_interval_secs");
    }

    #[test]
    fn update_deserializes_partial_json() {
        let update: ControlsUpdate =
            serde_json::from_str(r#"{"status_filter": "Completed"}"#).unwrap();

        assert_eq!(
            update.status_filter,
            Some(StatusFilter::Only(AppointmentStatus::Completed))
        );
        assert_eq!(update.row_limit, None);
    }
}
