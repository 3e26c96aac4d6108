use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use brewsim::clock::SystemClock;
use brewsim::config::{self, SimulationConfig};
use brewsim::orchestrator;
use brewsim::report;

/// Agent-based simulation of coworkers contending for a shared office coffee machine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the simulation report
    #[arg(short, long, default_value = "brewsim_output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting BrewSim coffee break simulation");

    let config = match &args.config {
        Some(path) => {
            info!("Configuration file: {:?}", path);
            config::load_config(path)?
        }
        None => {
            info!("No configuration file given, using the default office setup");
            SimulationConfig::default()
        }
    };

    let report = orchestrator::run_simulation(&config, Arc::new(SystemClock))?;

    match &report.last_depleter {
        Some(id) => info!("last person to empty the machine: {}", id),
        None => info!("the machine was never emptied"),
    }

    let path = report::write_report(&report, &args.output)?;
    info!("Simulation report written to {:?}", path);

    Ok(())
}
