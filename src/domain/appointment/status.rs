//! AppointmentStatus - the observed status of an appointment event.
//!
//! Each event is a single observation, so the status is a snapshot rather
//! than a state machine: there are no transitions to validate.

use super::macros::categorical;

categorical! {
    /// Status carried by an appointment event.
    AppointmentStatus, field = "status" {
        Scheduled => "Scheduled",
        Completed => "Completed",
        Cancelled => "Cancelled",
        NoShow => "No-Show",
    }
}

impl AppointmentStatus {
    /// Returns true if the visit took place.
    pub fn is_completed(&self) -> bool {
        matches!(self, AppointmentStatus::Completed)
    }

    /// Returns true if the visit was cancelled ahead of time.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_four_statuses_in_order() {
        assert_eq!(
            AppointmentStatus::ALL,
            &[
                AppointmentStatus::Scheduled,
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ]
        );
    }

    #[test]
    fn display_uses_wire_labels() {
        assert_eq!(AppointmentStatus::NoShow.to_string(), "No-Show");
        assert_eq!(AppointmentStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "no-show".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::NoShow
        );
        assert_eq!(
            " Cancelled ".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Cancelled
        );
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "Rescheduled".parse::<AppointmentStatus>().unwrap_err();
        assert_eq!(err.field(), "status");
        assert!(err.to_string().contains("Rescheduled"));
    }

    #[test]
    fn serializes_to_wire_label() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            "\"No-Show\""
        );
        let parsed: AppointmentStatus = serde_json::from_str("\"Scheduled\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Scheduled);
    }

    #[test]
    fn completed_and_cancelled_predicates() {
        assert!(AppointmentStatus::Completed.is_completed());
        assert!(!AppointmentStatus::Completed.is_cancelled());
        assert!(AppointmentStatus::Cancelled.is_cancelled());
        assert!(!AppointmentStatus::NoShow.is_completed());
    }
}
