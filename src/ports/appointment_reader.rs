//! AppointmentReader port - Read-only query surface of the appointment store.

use async_trait::async_trait;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::dashboard::Dataset;

/// Read-only port over persisted appointments.
#[async_trait]
pub trait AppointmentReader: Send + Sync {
    /// Most recent `limit` rows by arrival, newest first, optionally
    /// restricted to one status.
    async fn fetch_recent(
        &self,
        status: Option<AppointmentStatus>,
        limit: u32,
    ) -> Result<Dataset, QueryError>;
}

/// Errors that can occur while querying the store.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid row: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        QueryError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyReader;

    #[async_trait]
    impl AppointmentReader for EmptyReader {
        async fn fetch_recent(
            &self,
            _status: Option<AppointmentStatus>,
            _limit: u32,
        ) -> Result<Dataset, QueryError> {
            Ok(Dataset::empty())
        }
    }

    #[test]
    fn reader_trait_is_object_safe() {
        let _reader: Box<dyn AppointmentReader> = Box::new(EmptyReader);
    }

    #[test]
    fn error_conversion_from_sqlx() {
        let error: QueryError = sqlx::Error::RowNotFound.into();
        match error {
            QueryError::Database(_) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn error_messages() {
        let error = QueryError::Decode("unknown status 'Lost'".to_string());
        assert_eq!(error.to_string(), "Invalid row: unknown status 'Lost'");
    }
}
