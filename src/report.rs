//! Final simulation report and its JSON artifact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

/// Outcome of a completed simulation run.
///
/// Written to `simulation_report.json` in the output directory.
#[derive(Serialize, Debug)]
pub struct SimulationReport {
    /// When the report was generated (RFC 3339 in the JSON artifact).
    pub generated_at: DateTime<Utc>,
    /// Simulated duration of the run in seconds, as measured by the
    /// simulation clock.
    pub sim_seconds: f64,
    /// The agent whose refill drained the machine.
    pub last_depleter: Option<String>,
    pub machine: MachineReport,
    pub agents: Vec<AgentReport>,
}

/// Final machine accounting.
#[derive(Serialize, Debug)]
pub struct MachineReport {
    pub capacity: f64,
    /// Remaining quantity; zero after a completed run.
    pub quantity: f64,
    /// Total units released to cups over the whole run.
    pub dispensed: f64,
}

/// Final per-agent state.
#[derive(Serialize, Debug)]
pub struct AgentReport {
    pub id: String,
    /// Coffee left in the cup at the end of the day.
    pub fill: f64,
    /// Refill requests that actually received coffee.
    pub refills: u32,
}

/// Write the report as pretty-printed JSON into `output_dir`, creating the
/// directory if needed. Returns the path of the written file.
pub fn write_report(report: &SimulationReport, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).wrap_err_with(|| {
        format!(
            "Failed to create output directory '{}'",
            output_dir.display()
        )
    })?;

    let path = output_dir.join("simulation_report.json");
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)
        .wrap_err_with(|| format!("Failed to write simulation report '{}'", path.display()))?;

    Ok(path)
}
