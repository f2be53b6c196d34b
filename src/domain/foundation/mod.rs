//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary of the
//! CarePulse domain.

mod clock;
mod errors;
mod money;

pub use clock::{Clock, SystemClock};
pub use errors::ValidationError;
pub use money::Money;
