//! Appointment module - the event model and its synthetic generator.
//!
//! - `Appointment` - immutable event record (id, status, categories, costs, timestamp)
//! - `AppointmentStatus` and the categorical attributes
//! - `AppointmentGenerator` - one synthetic event per call from an injected random source

mod macros;

#[allow(clippy::module_inception)]
mod appointment;
mod categories;
mod generator;
mod status;

pub use appointment::{Appointment, AppointmentId, NewAppointment, APPOINTMENT_ID_LEN};
pub use categories::{City, Department, PaymentMethod, Urgency};
pub use generator::{AppointmentGenerator, BASE_COST_CENTS, COPAY_CENTS};
pub use status::AppointmentStatus;
