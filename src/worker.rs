//! Worker thread body for a single agent.

use std::sync::Arc;

use log::debug;

use crate::clock::Clock;
use crate::cup::Cup;
use crate::machine::CoffeeMachine;

/// Run one agent to completion: tick the owned cup until the machine is
/// exhausted, then hand the cup back through the thread's return value.
///
/// The emptiness check and the tick are two separate observations; a
/// worker may see "not empty" here and still find the machine drained once
/// its refill request gets the lock. That case is absorbed by the zero-step
/// path inside [`CoffeeMachine::request_refill`], not by this loop.
///
/// Returning the cup means per-agent results only exist after a join, so a
/// supervisor cannot read them from a still-running worker.
pub fn run(mut cup: Cup, machine: Arc<CoffeeMachine>, clock: Arc<dyn Clock>) -> Cup {
    debug!("{}: starting the day", cup.owner());

    while !machine.is_empty() {
        cup.tick(&machine, clock.as_ref());
    }

    debug!(
        "{}: machine is empty, heading home ({} refills)",
        cup.owner(),
        cup.refills()
    );
    cup
}
