// Test harness module
// Randomized lifecycle simulation and multi-seed certification

pub mod simulator;

pub use simulator::*;

use sampleboard_core::BoardConfig;

/// Test harness for running multi-seed certification
pub struct TestHarness;

impl TestHarness {
    /// Run the simulator across `seeds` seeds of `operations` each
    pub fn run_certification(
        board_config: &BoardConfig,
        seeds: u64,
        operations: u64,
    ) -> CertificationReport {
        let mut failed_seeds = Vec::new();
        let mut total_violations = 0;

        for seed in 0..seeds {
            let config = SimulatorConfig {
                seed,
                total_operations: operations,
                stop_on_first_violation: true,
            };

            let report = run_simulator(config, board_config);
            if !report.passed() {
                failed_seeds.push(seed);
            }
            total_violations += report.violations.len();
        }

        CertificationReport {
            passed: failed_seeds.is_empty(),
            total_violations,
            seeds_tested: seeds,
            failed_seeds,
        }
    }
}

/// Report from certification
#[derive(Debug, Clone)]
pub struct CertificationReport {
    pub passed: bool,
    pub total_violations: usize,
    pub seeds_tested: u64,
    pub failed_seeds: Vec<u64>,
}
