//! # Brewsim - Shared coffee machine contention simulator
//!
//! This library simulates a small office of coworkers, each drinking from a
//! privately owned cup that depletes in real time, all competing for one
//! shared, finite coffee machine that refills exactly one cup at a time.
//! When the machine runs dry, the run reports which coworker drained it.
//!
//! ## Overview
//!
//! The interesting part is the coordination protocol, not the coffee: each
//! agent runs on its own worker thread, all refills are serialized through
//! the machine's mutex, and the "last depleter" attribution is only read
//! after every worker has been joined, because the thread that drained the
//! machine may still be inside its refill call when the exhaustion flag
//! flips.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Type-safe configuration structures, YAML parsing, validation
//! - `clock`: Monotonic clock seam, with a virtual clock for tests
//! - `cup`: The per-agent depletable resource and its decay protocol
//! - `machine`: The shared exclusive resource and the refill protocol
//! - `worker`: Per-agent thread body
//! - `orchestrator`: Spawning, supervision, join-before-read termination
//! - `report`: Final attribution and statistics, written as JSON
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use brewsim::clock::SystemClock;
//! use brewsim::config::SimulationConfig;
//! use brewsim::orchestrator::run_simulation;
//!
//! // The default configuration is the classic office: three coworkers,
//! // one 500-unit machine.
//! let config = SimulationConfig::default();
//! let report = run_simulation(&config, Arc::new(SystemClock))?;
//!
//! match &report.last_depleter {
//!     Some(id) => println!("last person to empty the machine: {}", id),
//!     None => println!("the machine survived the day"),
//! }
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! The simulation itself has no failure states; configuration and I/O
//! errors are reported through `color_eyre` with context, and invalid
//! configurations are rejected up front by typed validation errors.

pub mod clock;
pub mod config;
pub mod cup;
pub mod machine;
pub mod orchestrator;
pub mod report;
pub mod worker;
