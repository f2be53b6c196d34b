//! Appointment - the event that flows through the pipeline end to end.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AppointmentStatus, City, Department, PaymentMethod, Urgency};
use crate::domain::foundation::Money;

/// Length of the short appointment token.
pub const APPOINTMENT_ID_LEN: usize = 8;

/// Short unique token identifying one appointment event.
///
/// Downstream consumers use it for idempotent de-duplication, so it is
/// assigned once at generation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    /// Creates a new token from the given random source.
    ///
    /// The token is the leading hex digits of a v4 UUID built from the
    /// source's bytes, so a seeded source yields a reproducible token.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let uuid = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let mut token = uuid.simple().to_string();
        token.truncate(APPOINTMENT_ID_LEN);
        Self(token)
    }

    /// Creates an id from an existing string (e.g. a stored row).
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for [`Appointment::new`].
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
    pub department: Department,
    pub urgency: Urgency,
    pub city: City,
    pub payment_method: PaymentMethod,
    pub base_cost: Money,
    pub copay: Money,
    pub created_at: DateTime<Utc>,
}

/// One synthesized appointment record.
///
/// Immutable once built. Serializes to the self-describing record the
/// channel carries; field names follow the downstream table
/// (`appointment_id`, `cost`, `timestamp`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    #[serde(rename = "appointment_id")]
    id: AppointmentId,
    status: AppointmentStatus,
    department: Department,
    urgency: Urgency,
    city: City,
    payment_method: PaymentMethod,
    base_cost: Money,
    copay: Money,
    #[serde(rename = "cost")]
    total_cost: Money,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

impl Appointment {
    /// Builds an appointment, deriving `total_cost = base_cost + copay`.
    ///
    /// The copay is forced to zero for self-paying patients.
    pub fn new(new: NewAppointment) -> Self {
        let copay = if new.payment_method.carries_copay() {
            new.copay
        } else {
            Money::ZERO
        };

        Self {
            id: new.id,
            status: new.status,
            department: new.department,
            urgency: new.urgency,
            city: new.city,
            payment_method: new.payment_method,
            base_cost: new.base_cost,
            copay,
            total_cost: new.base_cost + copay,
            created_at: new.created_at,
        }
    }

    pub fn id(&self) -> &AppointmentId {
        &self.id
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn base_cost(&self) -> Money {
        self.base_cost
    }

    pub fn copay(&self) -> Money {
        self.copay
    }

    pub fn total_cost(&self) -> Money {
        self.total_cost
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
