//! CarePulse - Real-time healthcare appointment pipeline
//!
//! A producer synthesizes appointment events and publishes them to a durable
//! channel; a dashboard polls the appointment store, aggregates the most
//! recent rows and renders the rollups on a fixed refresh cadence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
