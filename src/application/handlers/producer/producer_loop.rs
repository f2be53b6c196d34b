//! ProducerLoop - generate, publish, pause, repeat.
//!
//! The loop stops on the shutdown signal (which may cut a pause short) or on
//! the first delivery failure, which the binary treats as fatal.

use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::time;

use super::publish_appointment::{PublishAppointmentHandler, PublishError};
use crate::domain::appointment::AppointmentGenerator;
use crate::domain::foundation::Clock;
use crate::ports::DeliveryReceipt;

/// Draws the pause between publications uniformly from `[min, max]`.
#[derive(Debug)]
pub struct JitterPacer<R> {
    rng: R,
    min: Duration,
    max: Duration,
}

impl<R: Rng> JitterPacer<R> {
    /// Bounds given in the wrong order are swapped.
    pub fn new(rng: R, min: Duration, max: Duration) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { rng, min, max }
    }

    pub fn next_delay(&mut self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(min_ms..=max_ms))
    }
}

/// Background producer: one appointment per iteration.
pub struct ProducerLoop<R, C, P> {
    generator: AppointmentGenerator<R, C>,
    publisher: PublishAppointmentHandler,
    pacer: JitterPacer<P>,
    published: u64,
}

impl<R, C, P> ProducerLoop<R, C, P>
where
    R: Rng + Send,
    C: Clock,
    P: Rng + Send,
{
    pub fn new(
        generator: AppointmentGenerator<R, C>,
        publisher: PublishAppointmentHandler,
        pacer: JitterPacer<P>,
    ) -> Self {
        Self {
            generator,
            publisher,
            pacer,
            published: 0,
        }
    }

    /// Appointments acknowledged so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Generates and delivers a single appointment.
    pub async fn run_once(&mut self) -> Result<DeliveryReceipt, PublishError> {
        let appointment = self.generator.generate();

        match self.publisher.handle(&appointment).await {
            Ok(receipt) => {
                self.published += 1;
                tracing::info!(
                    count = self.published,
                    appointment_id = %appointment.id(),
                    status = %appointment.status(),
                    entry_id = %receipt.entry_id,
                    topic = %receipt.topic,
                    "Published appointment"
                );
                Ok(receipt)
            }
            Err(error) => {
                tracing::error!(
                    appointment_id = %appointment.id(),
                    attempts = error.attempts(),
                    error = %error,
                    "Failed to publish appointment"
                );
                Err(error)
            }
        }
    }

    /// Runs until shutdown. Returns the number of published appointments.
    ///
    /// # Arguments
    ///
    /// * `shutdown` - Watch channel that signals when to stop; a dropped
    ///   sender also stops the loop.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<u64, PublishError> {
        loop {
            if *shutdown.borrow() {
                break;
            }

            self.run_once().await?;

            let delay = self.pacer.next_delay();
            tokio::select! {
                _ = time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!(published = self.published, "Producer stopped");
        Ok(self.published)
    }
}
