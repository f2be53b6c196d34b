//! In-Memory Appointment Store Adapter
//!
//! Holds appointment rows in arrival order and answers the dashboard's
//! recent-rows query. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::dashboard::{AppointmentRow, Dataset};
use crate::ports::{AppointmentReader, QueryError};

/// In-memory appointment store with an injectable query failure
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentStore {
    rows: Arc<RwLock<Vec<AppointmentRow>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryAppointmentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a generated appointment, as the downstream consumer would
    pub async fn ingest(&self, appointment: &Appointment) {
        self.insert_row(AppointmentRow::from(appointment)).await;
    }

    /// Append a row; later rows count as more recent
    pub async fn insert_row(&self, row: AppointmentRow) {
        self.rows.write().await.push(row);
    }

    /// Make every query fail with a database error until cleared
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().await = Some(message.into());
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Get the number of stored rows
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl AppointmentReader for InMemoryAppointmentStore {
    async fn fetch_recent(
        &self,
        status: Option<AppointmentStatus>,
        limit: u32,
    ) -> Result<Dataset, QueryError> {
        if let Some(message) = self.failure.read().await.clone() {
            return Err(QueryError::Database(message));
        }

        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| status.map_or(true, |wanted| row.status == wanted))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
