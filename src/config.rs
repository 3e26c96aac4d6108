//! Simulation configuration structures and YAML parsing.
//!
//! Every rate, capacity, and pacing delay of the simulation lives here
//! instead of being baked into the components as constants. The defaults
//! reproduce the classic office setup: three coworkers drinking at 8
//! units/second from 100-unit cups, one 500-unit machine refilling at 12
//! units/second, with one-second pacing between observations.

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Top-level simulation configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub general: GeneralConfig,
    /// Names of the agents to simulate, one worker thread each.
    pub agents: Vec<String>,
    pub cup: CupConfig,
    pub machine: MachineConfig,
}

/// Shared pacing configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    /// Delay between consecutive drinking ticks, e.g. "1s" or "250ms".
    /// Must be positive; it keeps the log stream readable and drives
    /// elapsed time forward on the virtual test clock.
    #[serde(with = "humantime_serde")]
    pub tick_pace: Duration,
    /// Delay between consecutive transfer steps while refilling a cup.
    /// Must be positive.
    #[serde(with = "humantime_serde")]
    pub transfer_pace: Duration,
}

/// Per-agent cup parameters, uniform across agents.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CupConfig {
    /// Cup capacity in units; the fill level is clamped to [0, capacity].
    pub capacity: f64,
    /// Drinking rate in units per second. Must be positive.
    pub drink_rate: f64,
}

/// Shared coffee machine parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MachineConfig {
    /// Machine capacity in units; the quantity is clamped to [0, capacity].
    pub capacity: f64,
    /// Transfer rate while refilling a cup, in units per second. Must be
    /// positive.
    pub refill_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            agents: vec![
                "CoworkerA".to_string(),
                "CoworkerB".to_string(),
                "CoworkerC".to_string(),
            ],
            cup: CupConfig::default(),
            machine: MachineConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_pace: Duration::from_secs(1),
            transfer_pace: Duration::from_secs(1),
        }
    }
}

impl Default for CupConfig {
    fn default() -> Self {
        Self {
            capacity: 100.0,
            drink_rate: 8.0,
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            capacity: 500.0,
            refill_rate: 12.0,
        }
    }
}

impl SimulationConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.tick_pace.is_zero() {
            return Err(ValidationError::InvalidGeneral(
                "tick_pace must be positive".to_string(),
            ));
        }
        if self.general.transfer_pace.is_zero() {
            return Err(ValidationError::InvalidGeneral(
                "transfer_pace must be positive".to_string(),
            ));
        }

        if self.agents.is_empty() {
            return Err(ValidationError::InvalidAgent(
                "at least one agent must be configured".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.agents {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidAgent(
                    "agent names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::InvalidAgent(format!(
                    "duplicate agent name '{}'",
                    name
                )));
            }
        }

        if !(self.cup.capacity > 0.0 && self.cup.capacity.is_finite()) {
            return Err(ValidationError::InvalidCup(
                "cup capacity must be positive and finite".to_string(),
            ));
        }
        if !(self.cup.drink_rate > 0.0 && self.cup.drink_rate.is_finite()) {
            return Err(ValidationError::InvalidCup(
                "drink_rate must be positive and finite".to_string(),
            ));
        }

        if !(self.machine.capacity > 0.0 && self.machine.capacity.is_finite()) {
            return Err(ValidationError::InvalidMachine(
                "machine capacity must be positive and finite".to_string(),
            ));
        }
        if !(self.machine.refill_rate > 0.0 && self.machine.refill_rate.is_finite()) {
            return Err(ValidationError::InvalidMachine(
                "refill_rate must be positive and finite".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid agent configuration: {0}")]
    InvalidAgent(String),
    #[error("Invalid cup configuration: {0}")]
    InvalidCup(String),
    #[error("Invalid machine configuration: {0}")]
    InvalidMachine(String),
}

/// Load and validate a simulation configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> color_eyre::eyre::Result<SimulationConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read configuration file '{}'", path.display()))?;
    let config: SimulationConfig = serde_yaml::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}
