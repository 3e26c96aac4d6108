//! Simulation supervisor.
//!
//! This module coordinates a full simulation run: it wires the
//! configuration into the machine and cups, spawns one worker thread per
//! agent, waits for the machine to be exhausted, joins every worker, and
//! assembles the final report.
//!
//! The ordering contract lives here. The busy-wait on the machine's
//! exhaustion flag only decides *when* to begin shutdown; the attribution
//! and the per-agent results are read strictly after all workers have been
//! joined, because the worker that drained the machine may still be inside
//! its refill call when the flag flips.

use std::sync::Arc;
use std::thread;

use chrono::Utc;
use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{debug, info};

use crate::clock::Clock;
use crate::config::SimulationConfig;
use crate::cup::Cup;
use crate::machine::CoffeeMachine;
use crate::report::{AgentReport, MachineReport, SimulationReport};
use crate::worker;

/// Run the simulation to completion and return the final report.
pub fn run_simulation(config: &SimulationConfig, clock: Arc<dyn Clock>) -> Result<SimulationReport> {
    config.validate()?;

    let machine = Arc::new(CoffeeMachine::new(
        &config.machine,
        config.general.transfer_pace,
        Arc::clone(&clock),
    ));

    let started = clock.now();
    info!(
        "Brewing day starts: {} agents, machine holds {} units",
        config.agents.len(),
        config.machine.capacity
    );

    let mut handles = Vec::with_capacity(config.agents.len());
    for name in &config.agents {
        let cup = Cup::new(
            name.clone(),
            &config.cup,
            config.general.tick_pace,
            clock.now(),
        );
        let machine = Arc::clone(&machine);
        let clock = Arc::clone(&clock);
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || worker::run(cup, machine, clock))
            .wrap_err_with(|| format!("Failed to spawn worker thread for agent '{}'", name))?;
        handles.push(handle);
    }

    // Advisory readiness poll. This only schedules the shutdown; the join
    // loop below is what makes reading shared results safe.
    while !machine.is_empty() {
        thread::yield_now();
    }
    debug!("Machine reported empty, joining workers");

    let mut cups = Vec::with_capacity(handles.len());
    for handle in handles {
        let name = handle
            .thread()
            .name()
            .unwrap_or("<unnamed worker>")
            .to_string();
        let cup = handle
            .join()
            .map_err(|_| eyre!("Worker thread for agent '{}' panicked", name))?;
        cups.push(cup);
    }

    // All workers have fully exited; the attribution is now stable.
    let last_depleter = machine.last_depleter();
    let sim_seconds = clock.now().duration_since(started).as_secs_f64();

    let agents = cups
        .iter()
        .map(|cup| AgentReport {
            id: cup.owner().to_string(),
            fill: cup.fill(),
            refills: cup.refills(),
        })
        .collect();

    Ok(SimulationReport {
        generated_at: Utc::now(),
        sim_seconds,
        last_depleter,
        machine: MachineReport {
            capacity: machine.capacity(),
            quantity: machine.quantity(),
            dispensed: machine.dispensed(),
        },
        agents,
    })
}
