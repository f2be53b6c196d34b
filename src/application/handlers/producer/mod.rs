//! Producer handlers.
//!
//! Publishing with retries, and the paced loop that drives it.

mod producer_loop;
mod publish_appointment;

pub use producer_loop::{JitterPacer, ProducerLoop};
pub use publish_appointment::{PublishAppointmentHandler, PublishError, PublisherConfig};
