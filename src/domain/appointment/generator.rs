//! AppointmentGenerator - synthesizes one appointment per call.
//!
//! All categorical attributes are drawn independently and uniformly from
//! their fixed sets; costs are drawn in whole cents from closed ranges, so
//! generation can never fail. Randomness and time are both injected, which
//! lets tests pin the output for a given seed.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use super::{
    Appointment, AppointmentId, AppointmentStatus, City, Department, NewAppointment,
    PaymentMethod, Urgency,
};
use crate::domain::foundation::{Clock, Money, SystemClock};

/// Base cost range in cents ($80.00 - $1,200.00).
pub const BASE_COST_CENTS: RangeInclusive<u64> = 8_000..=120_000;

/// Copay range in cents ($10.00 - $80.00) for payers that carry one.
pub const COPAY_CENTS: RangeInclusive<u64> = 1_000..=8_000;

/// Generator of synthetic appointment events.
pub struct AppointmentGenerator<R, C = SystemClock> {
    rng: R,
    clock: C,
    last_created_at: Option<DateTime<Utc>>,
}

impl AppointmentGenerator<StdRng, SystemClock> {
    /// Generator seeded from OS entropy using the system clock.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SystemClock)
    }
}

impl<R: Rng, C: Clock> AppointmentGenerator<R, C> {
    /// Creates a generator over the given random source and clock.
    pub fn new(rng: R, clock: C) -> Self {
        Self {
            rng,
            clock,
            last_created_at: None,
        }
    }

    /// Produces the next appointment.
    ///
    /// `created_at` never moves backwards across calls, even if the clock does.
    pub fn generate(&mut self) -> Appointment {
        let id = AppointmentId::generate(&mut self.rng);
        let department = pick(&mut self.rng, Department::ALL);
        let status = pick(&mut self.rng, AppointmentStatus::ALL);
        let city = pick(&mut self.rng, City::ALL);
        let payment_method = pick(&mut self.rng, PaymentMethod::ALL);
        let urgency = pick(&mut self.rng, Urgency::ALL);

        let base_cost = Money::from_cents(self.rng.gen_range(BASE_COST_CENTS));
        let copay = if payment_method.carries_copay() {
            Money::from_cents(self.rng.gen_range(COPAY_CENTS))
        } else {
            Money::ZERO
        };

        let now = self.clock.now();
        let created_at = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(created_at);

        Appointment::new(NewAppointment {
            id,
            status,
            department,
            urgency,
            city,
            payment_method,
            base_cost,
            copay,
            created_at,
        })
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;

    /// Clock that replays a scripted sequence of instants.
    struct ScriptedClock {
        instants: Mutex<Vec<DateTime<Utc>>>,
    }

    impl ScriptedClock {
        fn new(mut instants: Vec<DateTime<Utc>>) -> Self {
            instants.reverse();
            Self {
                instants: Mutex::new(instants),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> DateTime<Utc> {
            self.instants.lock().unwrap().pop().expect("script exhausted")
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, 0, 0).unwrap()
    }

    #[test]
    fn same_seed_produces_identical_events() {
        let clock = ScriptedClock::new(vec![base_time(), base_time()]);
        let mut a = AppointmentGenerator::new(StdRng::seed_from_u64(99), clock);
        let clock = ScriptedClock::new(vec![base_time(), base_time()]);
        let mut b = AppointmentGenerator::new(StdRng::seed_from_u64(99), clock);

        assert_eq!(a.generate(), b.generate());
        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn costs_stay_within_ranges() {
        let mut generator = AppointmentGenerator::new(StdRng::seed_from_u64(1), SystemClock);

        for _ in 0..500 {
            let appointment = generator.generate();
            assert!(BASE_COST_CENTS.contains(&appointment.base_cost().cents()));
            if appointment.payment_method().carries_copay() {
                assert!(COPAY_CENTS.contains(&appointment.copay().cents()));
            } else {
                assert!(appointment.copay().is_zero());
            }
            assert!(appointment.total_cost() >= appointment.base_cost());
            assert!(appointment.copay() <= appointment.total_cost());
        }
    }

    #[test]
    fn created_at_never_moves_backwards() {
        let t0 = base_time();
        let clock = ScriptedClock::new(vec![
            t0,
            t0 - Duration::seconds(5),
            t0 + Duration::seconds(3),
        ]);
        let mut generator = AppointmentGenerator::new(StdRng::seed_from_u64(3), clock);

        let first = generator.generate().created_at();
        let second = generator.generate().created_at();
        let third = generator.generate().created_at();

        assert_eq!(first, t0);
        assert_eq!(second, t0);
        assert_eq!(third, t0 + Duration::seconds(3));
    }

    #[test]
    fn every_category_value_eventually_appears() {
        let mut generator = AppointmentGenerator::new(StdRng::seed_from_u64(11), SystemClock);
        let events: Vec<_> = (0..1_000).map(|_| generator.generate()).collect();

        for status in AppointmentStatus::ALL {
            assert!(events.iter().any(|e| e.status() == *status));
        }
        for department in Department::ALL {
            assert!(events.iter().any(|e| e.department() == *department));
        }
        for method in PaymentMethod::ALL {
            assert!(events.iter().any(|e| e.payment_method() == *method));
        }
    }

    #[test]
    fn ids_are_unique_across_a_stream() {
        let mut generator = AppointmentGenerator::new(StdRng::seed_from_u64(5), SystemClock);
        let mut ids: Vec<_> = (0..200).map(|_| generator.generate().id().clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }
}
