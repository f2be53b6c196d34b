//! Dataset - the snapshot of recent appointments fetched for one refresh cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::appointment::{Appointment, AppointmentId, AppointmentStatus};

/// One persisted appointment as read back from the store.
///
/// Categorical attributes stay as stored labels; `base_cost`, `copay` and
/// `timestamp` are optional because the store may not carry those columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentRow {
    pub appointment_id: AppointmentId,
    pub status: AppointmentStatus,
    pub department: String,
    pub urgency: String,
    pub city: String,
    pub payment_method: String,
    /// Total cost (base cost plus copay).
    pub cost: f64,
    pub base_cost: Option<f64>,
    pub copay: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&Appointment> for AppointmentRow {
    fn from(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id().clone(),
            status: appointment.status(),
            department: appointment.department().to_string(),
            urgency: appointment.urgency().to_string(),
            city: appointment.city().to_string(),
            payment_method: appointment.payment_method().to_string(),
            cost: appointment.total_cost().as_f64(),
            base_cost: Some(appointment.base_cost().as_f64()),
            copay: Some(appointment.copay().as_f64()),
            timestamp: Some(appointment.created_at()),
        }
    }
}

/// Ordered rows, most recent arrival first, owned by a single refresh cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<AppointmentRow>,
}

impl Dataset {
    pub fn new(rows: Vec<AppointmentRow>) -> Self {
        Self { rows }
    }

    /// An empty snapshot (no data yet, or a failed query).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[AppointmentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows, for the raw-data preview.
    pub fn preview(&self, n: usize) -> Vec<AppointmentRow> {
        self.rows.iter().take(n).cloned().collect()
    }

    /// True when at least one row carries a timestamp.
    pub fn has_timestamps(&self) -> bool {
        self.rows.iter().any(|row| row.timestamp.is_some())
    }
}

impl FromIterator<AppointmentRow> for Dataset {
    fn from_iter<I: IntoIterator<Item = AppointmentRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
