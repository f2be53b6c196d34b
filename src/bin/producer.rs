//! Appointment producer: generates synthetic appointments and publishes them
//! to the Redis stream until Ctrl-C or a delivery failure.

use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use carepulse::adapters::RedisStreamChannel;
use carepulse::application::{JitterPacer, ProducerLoop, PublishAppointmentHandler, PublisherConfig};
use carepulse::config::AppConfig;
use carepulse::domain::appointment::AppointmentGenerator;
use carepulse::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging);
    config
        .validate_for_producer()
        .context("invalid producer configuration")?;

    let producer_config = &config.producer;
    info!(
        topic = %producer_config.topic,
        max_retries = producer_config.max_retries,
        send_timeout_secs = producer_config.send_timeout_secs,
        "Starting appointment producer"
    );

    let channel = match RedisStreamChannel::connect(&config.redis, producer_config.stream_max_len).await {
        Ok(channel) => channel,
        Err(err) => {
            error!(error = %err, "Could not connect to the event channel");
            return Err(err).context("failed to connect to Redis");
        }
    };

    let publisher =
        PublishAppointmentHandler::with_config(Arc::new(channel), PublisherConfig::from(producer_config));
    let pacer = JitterPacer::new(
        StdRng::from_entropy(),
        producer_config.pacing_min(),
        producer_config.pacing_max(),
    );
    let mut producer = ProducerLoop::new(AppointmentGenerator::from_entropy(), publisher, pacer);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    let published = producer
        .run(shutdown_rx)
        .await
        .context("appointment delivery failed")?;

    info!(published, "Producer exited cleanly");
    Ok(())
}
