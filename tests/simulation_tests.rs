#[cfg(test)]
mod simulation_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use brewsim::clock::ManualClock;
    use brewsim::config::{CupConfig, GeneralConfig, MachineConfig, SimulationConfig};
    use brewsim::orchestrator::run_simulation;
    use brewsim::report::write_report;

    fn fast_general() -> GeneralConfig {
        GeneralConfig {
            tick_pace: Duration::from_millis(20),
            transfer_pace: Duration::from_millis(20),
        }
    }

    /// One agent, cup 100 at 8 units/sec, machine 20 at 12 units/sec: the
    /// cup empties after ~12.5 simulated seconds and the machine fully
    /// drains during the single refill that follows.
    #[test]
    fn test_solo_agent_drains_the_machine() {
        let config = SimulationConfig {
            general: GeneralConfig {
                tick_pace: Duration::from_millis(50),
                transfer_pace: Duration::from_millis(50),
            },
            agents: vec!["Solo".to_string()],
            cup: CupConfig {
                capacity: 100.0,
                drink_rate: 8.0,
            },
            machine: MachineConfig {
                capacity: 20.0,
                refill_rate: 12.0,
            },
        };

        let report = run_simulation(&config, Arc::new(ManualClock::new())).unwrap();

        assert_eq!(report.last_depleter, Some("Solo".to_string()));
        assert_eq!(report.machine.quantity, 0.0);
        assert!((report.machine.dispensed - 20.0).abs() < 1e-6);

        assert_eq!(report.agents.len(), 1);
        let solo = &report.agents[0];
        assert_eq!(solo.id, "Solo");
        assert_eq!(solo.refills, 1);
        // The machine held less than a cupful, so the cup ends with what
        // the machine had left.
        assert!((solo.fill - 20.0).abs() < 1e-6);

        // Drinking 100 units at 8 units/sec alone takes 12.5 simulated
        // seconds before the refill even starts.
        assert!(report.sim_seconds > 12.0);
    }

    /// Three agents and a machine holding exactly two full refills: exactly
    /// one refill call observes the machine run dry, and latecomers get
    /// nothing without disturbing the attribution.
    #[test]
    fn test_three_agents_two_refills() {
        let agents = vec![
            "CoworkerA".to_string(),
            "CoworkerB".to_string(),
            "CoworkerC".to_string(),
        ];
        let config = SimulationConfig {
            general: fast_general(),
            agents: agents.clone(),
            cup: CupConfig {
                capacity: 100.0,
                drink_rate: 50.0,
            },
            machine: MachineConfig {
                capacity: 200.0,
                refill_rate: 100.0,
            },
        };

        let report = run_simulation(&config, Arc::new(ManualClock::new())).unwrap();

        let last = report.last_depleter.clone().expect("attribution must be set");
        assert!(agents.contains(&last));

        assert_eq!(report.machine.quantity, 0.0);
        // Conservation: everything the machine released is accounted for.
        assert!((report.machine.dispensed - 200.0).abs() < 1e-6);
        assert!(
            (report.machine.capacity - report.machine.quantity - report.machine.dispensed).abs()
                < 1e-6
        );

        // 200 units in servings of at most one cupful means at least two
        // served refills across the office.
        let total_refills: u32 = report.agents.iter().map(|a| a.refills).sum();
        assert!(total_refills >= 2);

        for agent in &report.agents {
            assert!(agent.fill >= 0.0 && agent.fill <= 100.0);
        }
    }

    /// The default office setup terminates and produces an attribution.
    #[test]
    fn test_default_setup_terminates() {
        let config = SimulationConfig::default();
        let report = run_simulation(&config, Arc::new(ManualClock::new())).unwrap();

        assert!(report.last_depleter.is_some());
        assert_eq!(report.machine.quantity, 0.0);
        assert!((report.machine.dispensed - 500.0).abs() < 1e-6);
        assert_eq!(report.agents.len(), 3);
        for agent in &report.agents {
            assert!(agent.fill >= 0.0 && agent.fill <= 100.0);
        }
        assert!(report.sim_seconds > 0.0);
    }

    /// Invalid configurations are rejected before any thread is spawned.
    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.agents.clear();

        assert!(run_simulation(&config, Arc::new(ManualClock::new())).is_err());
    }

    #[test]
    fn test_report_is_written_as_json() {
        let config = SimulationConfig {
            general: fast_general(),
            agents: vec!["Solo".to_string()],
            cup: CupConfig {
                capacity: 100.0,
                drink_rate: 50.0,
            },
            machine: MachineConfig {
                capacity: 20.0,
                refill_rate: 100.0,
            },
        };
        let report = run_simulation(&config, Arc::new(ManualClock::new())).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = write_report(&report, dir.path()).unwrap();

        assert!(path.ends_with("simulation_report.json"));
        let content = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["last_depleter"], "Solo");
        assert_eq!(json["machine"]["quantity"], 0.0);
    }
}
