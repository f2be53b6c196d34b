//! PostgreSQL implementation of AppointmentReader.
//!
//! Reads the `appointments` table written by the downstream consumer. The
//! projection is `SELECT *` so optional columns (`base_cost`, `copay`,
//! `timestamp`) can be absent from older deployments; an absent column
//! decodes as `None`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::appointment::{AppointmentId, AppointmentStatus};
use crate::domain::dashboard::{AppointmentRow, Dataset};
use crate::ports::{AppointmentReader, QueryError};

const SELECT_RECENT: &str = r#"
    SELECT * FROM appointments
    ORDER BY ingested_at DESC, appointment_id DESC
    LIMIT $1
"#;

const SELECT_RECENT_BY_STATUS: &str = r#"
    SELECT * FROM appointments
    WHERE status = $1
    ORDER BY ingested_at DESC, appointment_id DESC
    LIMIT $2
"#;

const BASE_COST_COLUMN: &str = "base_cost";
const COPAY_COLUMN: &str = "copay";
const TIMESTAMP_COLUMN: &str = "timestamp";

/// Text timestamps without an offset are taken as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// PostgreSQL implementation of AppointmentReader.
#[derive(Clone)]
pub struct PostgresAppointmentReader {
    pool: PgPool,
}

impl PostgresAppointmentReader {
    /// Creates a new PostgresAppointmentReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentReader for PostgresAppointmentReader {
    async fn fetch_recent(
        &self,
        status: Option<AppointmentStatus>,
        limit: u32,
    ) -> Result<Dataset, QueryError> {
        let limit = i64::from(limit);

        // Status is always bound, never interpolated
        let rows = match status {
            Some(status) => {
                sqlx::query(SELECT_RECENT_BY_STATUS)
                    .bind(status.as_str())
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query(SELECT_RECENT)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let rows = rows
            .iter()
            .map(row_to_appointment)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(rows = rows.len(), ?status, "Fetched appointments");
        Ok(Dataset::new(rows))
    }
}

fn row_to_appointment(row: &PgRow) -> Result<AppointmentRow, QueryError> {
    let appointment_id: String = row.try_get("appointment_id")?;
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<AppointmentStatus>()
        .map_err(|_| QueryError::Decode(format!("unknown status '{}' for {}", status, appointment_id)))?;

    Ok(AppointmentRow {
        status,
        department: row.try_get("department")?,
        urgency: row.try_get("urgency")?,
        city: row.try_get("city")?,
        payment_method: row.try_get("payment_method")?,
        cost: row.try_get("cost")?,
        base_cost: optional_column::<f64>(row, BASE_COST_COLUMN)?,
        copay: optional_column::<f64>(row, COPAY_COLUMN)?,
        timestamp: timestamp_column(row)?,
        appointment_id: AppointmentId::from_string(appointment_id),
    })
}

/// Reads a nullable column that may not exist at all.
fn optional_column<'r, T>(row: &'r PgRow, column: &str) -> Result<Option<T>, QueryError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// `timestamp` is TIMESTAMPTZ; a plain TIMESTAMP column is read as UTC and a
/// text column is parsed. A value that cannot be read only costs the row its
/// place in the trend.
fn timestamp_column(row: &PgRow) -> Result<Option<DateTime<Utc>>, QueryError> {
    match row.try_get::<Option<DateTime<Utc>>, _>(TIMESTAMP_COLUMN) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(sqlx::Error::ColumnDecode { .. }) => Ok(fallback_timestamp(row)),
        Err(e) => Err(e.into()),
    }
}

fn fallback_timestamp(row: &PgRow) -> Option<DateTime<Utc>> {
    if let Ok(naive) = row.try_get::<Option<NaiveDateTime>, _>(TIMESTAMP_COLUMN) {
        return naive.map(|value| value.and_utc());
    }

    match row.try_get::<Option<String>, _>(TIMESTAMP_COLUMN) {
        Ok(Some(text)) => {
            let parsed = parse_timestamp(&text);
            if parsed.is_none() {
                tracing::warn!(value = %text, "Unreadable appointment timestamp, excluded from trend");
            }
            parsed
        }
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(error = %error, "Unsupported timestamp column type, excluded from trend");
            None
        }
    }
}

/// Parses a stored timestamp: RFC 3339, or a naive date-time taken as UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|value| value.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filtered_query_binds_status_and_limit() {
        assert!(SELECT_RECENT_BY_STATUS.contains("WHERE status = $1"));
        assert!(SELECT_RECENT_BY_STATUS.contains("LIMIT $2"));
        assert!(!SELECT_RECENT.contains("WHERE"));
        assert!(SELECT_RECENT.contains("LIMIT $1"));
    }

    #[test]
    fn text_timestamp_in_rfc3339_is_parsed() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-01T09:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T09:30:00.000000+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:30:00+01:00"), Some(expected));
    }

    #[test]
    fn text_timestamp_without_offset_is_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-01T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-03-01 09:30:00.000 "), Some(expected));
    }

    #[test]
    fn unreadable_text_timestamp_is_dropped() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01T09:30:00Z"), None);
    }

    #[test]
    fn queries_order_newest_first() {
        for sql in [SELECT_RECENT, SELECT_RECENT_BY_STATUS] {
            assert!(sql.contains("ORDER BY ingested_at DESC"));
        }
    }
}
