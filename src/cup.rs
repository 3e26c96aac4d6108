//! The per-agent coffee cup: a privately owned, continuously depleting
//! resource.
//!
//! A cup is owned by exactly one worker thread and is never shared across
//! threads; the only cross-thread state it touches is the machine, and only
//! through [`CoffeeMachine::request_refill`].

use std::time::{Duration, Instant};

use log::info;

use crate::clock::Clock;
use crate::config::CupConfig;
use crate::machine::CoffeeMachine;

/// A coworker's coffee cup.
pub struct Cup {
    owner: String,
    fill: f64,
    capacity: f64,
    drink_rate: f64,
    tick_pace: Duration,
    last_sample: Instant,
    refills: u32,
}

impl Cup {
    /// Create a full cup for `owner`, sampled at `now`.
    pub fn new(owner: impl Into<String>, config: &CupConfig, tick_pace: Duration, now: Instant) -> Self {
        Self {
            owner: owner.into(),
            fill: config.capacity,
            capacity: config.capacity,
            drink_rate: config.drink_rate,
            tick_pace,
            last_sample: now,
            refills: 0,
        }
    }

    /// The owning agent's name.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Current fill level in units, always within `[0, capacity]`.
    pub fn fill(&self) -> f64 {
        self.fill
    }

    /// Cup capacity in units.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Number of refill requests that actually received coffee.
    pub fn refills(&self) -> u32 {
        self.refills
    }

    pub fn is_empty(&self) -> bool {
        self.fill <= 0.0
    }

    /// Advance the cup by one simulation step.
    ///
    /// While the cup holds coffee this drains it by `drink_rate` times the
    /// elapsed time since the previous sample, then pauses for the
    /// configured tick pace. Once empty it requests a refill from the
    /// machine, which blocks until the machine's lock is available. The
    /// sample timestamp is re-stamped after the refill returns so the time
    /// spent queueing at the machine is not charged as drinking time.
    pub fn tick(&mut self, machine: &CoffeeMachine, clock: &dyn Clock) {
        let now = clock.now();
        let elapsed = now.duration_since(self.last_sample);
        self.last_sample = now;

        if !self.is_empty() {
            self.fill = (self.fill - self.drink_rate * elapsed.as_secs_f64()).max(0.0);
            info!("{}: {:.1}", self.owner, self.fill);
            clock.sleep(self.tick_pace);
        } else {
            let received = machine.request_refill(self);
            if received > 0.0 {
                // Only the owning thread writes this counter, and only for
                // requests that were actually served.
                self.refills += 1;
            }
            self.last_sample = clock.now();
        }
    }

    /// Pour `units` into the cup, clamping at capacity. Overflow past the
    /// brim is spilled, not returned to the machine.
    pub(crate) fn add(&mut self, units: f64) {
        self.fill = (self.fill + units).min(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::MachineConfig;
    use std::sync::Arc;

    fn test_machine(capacity: f64, clock: Arc<ManualClock>) -> CoffeeMachine {
        let config = MachineConfig {
            capacity,
            refill_rate: 50.0,
        };
        CoffeeMachine::new(&config, Duration::from_millis(100), clock)
    }

    fn test_cup(clock: &ManualClock) -> Cup {
        let config = CupConfig {
            capacity: 100.0,
            drink_rate: 8.0,
        };
        Cup::new("Tester", &config, Duration::from_millis(100), clock.now())
    }

    #[test]
    fn test_decay_tracks_elapsed_time() {
        let clock = Arc::new(ManualClock::new());
        let machine = test_machine(500.0, Arc::clone(&clock));
        let mut cup = test_cup(&clock);

        clock.advance(Duration::from_secs(5));
        cup.tick(&machine, clock.as_ref());

        // 5 seconds at 8 units/second
        assert!((cup.fill() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_clamps_at_zero() {
        let clock = Arc::new(ManualClock::new());
        let machine = test_machine(500.0, Arc::clone(&clock));
        let mut cup = test_cup(&clock);

        clock.advance(Duration::from_secs(3600));
        cup.tick(&machine, clock.as_ref());

        assert_eq!(cup.fill(), 0.0);
        assert!(cup.is_empty());
    }

    #[test]
    fn test_empty_cup_requests_refill_and_counts_it() {
        let clock = Arc::new(ManualClock::new());
        let machine = test_machine(500.0, Arc::clone(&clock));
        let mut cup = test_cup(&clock);

        // Drain the cup, then tick once more to trigger the refill.
        clock.advance(Duration::from_secs(3600));
        cup.tick(&machine, clock.as_ref());
        assert!(cup.is_empty());

        cup.tick(&machine, clock.as_ref());

        assert!((cup.fill() - cup.capacity()).abs() < 1e-9);
        assert_eq!(cup.refills(), 1);
    }

    #[test]
    fn test_refill_against_empty_machine_counts_nothing() {
        let clock = Arc::new(ManualClock::new());
        let machine = test_machine(30.0, Arc::clone(&clock));
        let mut cup = test_cup(&clock);

        clock.advance(Duration::from_secs(3600));
        cup.tick(&machine, clock.as_ref());
        cup.tick(&machine, clock.as_ref());
        assert_eq!(cup.refills(), 1);
        assert!(machine.is_empty());

        // Drain again and come back to a dry machine.
        clock.advance(Duration::from_secs(3600));
        cup.tick(&machine, clock.as_ref());
        cup.tick(&machine, clock.as_ref());

        assert_eq!(cup.refills(), 1);
        assert!(cup.is_empty());
    }

    #[test]
    fn test_refill_wait_not_charged_as_drinking_time() {
        let clock = Arc::new(ManualClock::new());
        let machine = test_machine(500.0, Arc::clone(&clock));
        let mut cup = test_cup(&clock);

        clock.advance(Duration::from_secs(3600));
        cup.tick(&machine, clock.as_ref());
        assert!(cup.is_empty());

        // The refill itself advances virtual time; the next decay step must
        // start from the post-refill instant, not from before the refill.
        cup.tick(&machine, clock.as_ref());
        let filled = cup.fill();

        clock.advance(Duration::from_secs(1));
        cup.tick(&machine, clock.as_ref());

        assert!((filled - cup.fill() - 8.0).abs() < 1e-9);
    }
}
