//! Appointments dashboard: polls the appointment store, renders rollups to
//! the terminal and serves the operator API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use carepulse::adapters::http::{api_router, DashboardAppState};
use carepulse::adapters::postgres::{connect_pool, run_migrations};
use carepulse::adapters::{FanoutRenderer, PostgresAppointmentReader, SnapshotRenderer, TerminalRenderer};
use carepulse::application::{DashboardControlsHandle, RefreshLoop};
use carepulse::config::AppConfig;
use carepulse::ports::DashboardRenderer;
use carepulse::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging);
    config
        .validate_for_dashboard()
        .context("invalid dashboard configuration")?;

    let pool = connect_pool(&config.database).context("invalid database configuration")?;
    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .context("failed to run database migrations")?;
        info!("Database migrations applied");
    }

    let controls = DashboardControlsHandle::new(
        config.dashboard.initial_controls()?,
        config.dashboard.bounds(),
    )?;

    let snapshots = Arc::new(SnapshotRenderer::new());
    let mut renderer = FanoutRenderer::new().with(snapshots.clone());
    if config.dashboard.terminal_output {
        renderer = renderer.with(Arc::new(TerminalRenderer::stdout()));
    }
    let renderer: Arc<dyn DashboardRenderer> = Arc::new(renderer);

    let refresh = RefreshLoop::new(
        Arc::new(PostgresAppointmentReader::new(pool.clone())),
        renderer,
        controls.clone(),
    )
    .with_preview_rows(config.dashboard.preview_rows);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let refresh_shutdown = shutdown_rx.clone();
    let refresh_task = tokio::spawn(async move { refresh.run(refresh_shutdown).await });

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Operator API listening");

    let app = api_router(
        DashboardAppState::new(snapshots, controls),
        config.server.request_timeout(),
    );

    let mut server_shutdown = shutdown_rx.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = server_shutdown.wait_for(|stop| *stop).await;
    });

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    server.await.context("operator API failed")?;
    let cycles = refresh_task.await.context("refresh loop panicked")?;

    pool.close().await;
    info!(cycles, "Dashboard exited cleanly");
    Ok(())
}
