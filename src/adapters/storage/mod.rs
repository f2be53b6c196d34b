//! Storage Adapters
//!
//! In-process implementations of the read-side ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryAppointmentStore** - Appointment rows in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryAppointmentStore;
//!
//! let store = InMemoryAppointmentStore::new();
//! store.ingest(&appointment).await;
//! let dataset = store.fetch_recent(None, 200).await?;
//! ```

mod in_memory_appointment_store;

pub use in_memory_appointment_store::InMemoryAppointmentStore;
