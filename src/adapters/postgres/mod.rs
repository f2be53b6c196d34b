//! PostgreSQL adapters - Database implementations for the read-side ports.
//!
//! - `PostgresAppointmentReader` - Recent-rows query over the appointments table
//! - `connect_pool` / `run_migrations` - Pool setup used by the dashboard binary

mod appointment_reader;

pub use appointment_reader::PostgresAppointmentReader;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Builds the connection pool without connecting.
///
/// Connections are opened on first use, so an unreachable database shows up
/// as a query failure on the dashboard instead of aborting startup.
pub fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect_lazy(&config.url)?;

    tracing::info!(
        min_connections = config.min_connections,
        max_connections = config.max_connections,
        "Database pool configured"
    );
    Ok(pool)
}

/// Creates the appointments table if it does not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
