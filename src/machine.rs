//! The shared office coffee machine: one finite, mutex-guarded resource
//! that every worker thread draws from.
//!
//! All mutation of the machine's quantity and of the last-depleter
//! attribution happens inside [`CoffeeMachine::request_refill`], under the
//! machine's lock. Nothing else in the crate can reach the guarded state,
//! so the mutual-exclusion discipline is structural rather than a calling
//! convention.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::config::MachineConfig;
use crate::cup::Cup;

/// The single shared, exclusive-access coffee machine.
pub struct CoffeeMachine {
    capacity: f64,
    refill_rate: f64,
    transfer_pace: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<MachineState>,
    /// Advisory exhaustion flag, raised inside the critical section by the
    /// refill call that drains the machine. Lets worker loops and the
    /// supervisor poll for emptiness without contending on the lock.
    depleted: AtomicBool,
    /// Number of refill calls currently inside the transfer loop. The
    /// mutex makes anything above 1 impossible; the counter exists so the
    /// invariant is observable.
    refills_in_flight: AtomicU32,
    max_refill_overlap: AtomicU32,
}

/// State guarded by the machine's lock.
struct MachineState {
    quantity: f64,
    last_depleter: Option<String>,
    /// Total units actually released across all refills. Coffee spilled at
    /// a cup's brim still counts: the machine released it.
    dispensed: f64,
}

impl CoffeeMachine {
    /// Create a full machine.
    pub fn new(config: &MachineConfig, transfer_pace: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            capacity: config.capacity,
            refill_rate: config.refill_rate,
            transfer_pace,
            clock,
            state: Mutex::new(MachineState {
                quantity: config.capacity,
                last_depleter: None,
                dispensed: 0.0,
            }),
            depleted: AtomicBool::new(config.capacity <= 0.0),
            refills_in_flight: AtomicU32::new(0),
            max_refill_overlap: AtomicU32::new(0),
        }
    }

    /// Non-blocking emptiness check.
    ///
    /// Advisory: a caller may observe "not empty" and still find the
    /// machine drained by the time it requests a refill. Correctness never
    /// depends on this flag, only scheduling does.
    pub fn is_empty(&self) -> bool {
        self.depleted.load(Ordering::Acquire)
    }

    /// Machine capacity in units.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Current quantity in units.
    pub fn quantity(&self) -> f64 {
        self.state.lock().quantity
    }

    /// Total units released to cups so far.
    pub fn dispensed(&self) -> f64 {
        self.state.lock().dispensed
    }

    /// The agent whose refill drained the machine, once that has happened.
    pub fn last_depleter(&self) -> Option<String> {
        self.state.lock().last_depleter.clone()
    }

    /// Serve coffee into `cup` until the cup is full or the machine is dry.
    ///
    /// This is the single serialization point of the simulation: the lock
    /// is held for the whole transfer loop and released on every exit path
    /// when the guard drops. Each loop step transfers `refill_rate` times
    /// the elapsed time since the previous step, never more than the
    /// machine still holds, then pauses for the configured transfer pace.
    ///
    /// A call that finds the machine already empty performs zero transfer
    /// steps and returns without touching the attribution. The call that
    /// observes the quantity reach zero records the cup's owner as the last
    /// depleter and raises the exhaustion flag; the attribution is
    /// therefore written exactly once per run.
    ///
    /// Returns the total units released into the cup.
    pub fn request_refill(&self, cup: &mut Cup) -> f64 {
        let mut state = self.state.lock();

        let overlap = self.refills_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_refill_overlap.fetch_max(overlap, Ordering::SeqCst);
        debug_assert_eq!(overlap, 1, "transfer loop must be exclusive");

        let had_coffee = state.quantity > 0.0;
        let mut served = 0.0;
        let mut last_sample = self.clock.now();

        while state.quantity > 0.0 && cup.fill() < cup.capacity() {
            let now = self.clock.now();
            let elapsed = now.duration_since(last_sample);
            last_sample = now;

            let step = self.refill_rate * elapsed.as_secs_f64();
            let released = step.min(state.quantity);
            state.quantity -= released;
            cup.add(released);
            state.dispensed += released;
            served += released;

            info!("{}: refilling...", cup.owner());
            self.clock.sleep(self.transfer_pace);
        }

        if had_coffee && state.quantity <= 0.0 {
            state.quantity = 0.0;
            state.last_depleter = Some(cup.owner().to_string());
            self.depleted.store(true, Ordering::Release);
        }

        self.refills_in_flight.fetch_sub(1, Ordering::SeqCst);
        served
    }
}
