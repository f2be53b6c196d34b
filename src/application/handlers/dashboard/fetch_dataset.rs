//! FetchDatasetHandler - Query handler for one refresh cycle's snapshot.
//!
//! Store failures never escape: they come back as an empty dataset plus a
//! diagnostic, so the refresh loop can render them inline and try again on
//! the next cycle.

use std::sync::Arc;

use crate::domain::dashboard::{Dataset, StatusFilter};
use crate::ports::AppointmentReader;

/// Query for the most recent appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchDatasetQuery {
    pub status_filter: StatusFilter,
    pub limit: u32,
}

/// Snapshot plus, when the query failed, the reason.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchDatasetResult {
    pub dataset: Dataset,
    pub diagnostic: Option<String>,
}

/// Handler for fetching the recent-rows dataset.
pub struct FetchDatasetHandler {
    reader: Arc<dyn AppointmentReader>,
}

impl FetchDatasetHandler {
    pub fn new(reader: Arc<dyn AppointmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: FetchDatasetQuery) -> FetchDatasetResult {
        let status = query.status_filter.as_status();

        match self.reader.fetch_recent(status, query.limit).await {
            Ok(dataset) => FetchDatasetResult {
                dataset,
                diagnostic: None,
            },
            Err(error) => {
                tracing::warn!(
                    filter = %query.status_filter,
                    limit = query.limit,
                    error = %error,
                    "Appointment query failed"
                );
                FetchDatasetResult {
                    dataset: Dataset::empty(),
                    diagnostic: Some(error.to_string()),
                }
            }
        }
    }
}
