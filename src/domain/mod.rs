//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (money, clock, validation errors)
//! - `appointment` - The appointment event and its synthetic generator
//! - `dashboard` - Datasets, rollups, operator controls and view models

pub mod appointment;
pub mod dashboard;
pub mod foundation;
