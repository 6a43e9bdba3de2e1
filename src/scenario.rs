//! Scenario runner for batch goal seeks
//!
//! Holds one solver configuration and fans independent scenarios out over
//! the rayon thread pool. Scenarios share nothing, so results are identical
//! to running them one at a time.

use crate::error::GoalSeekError;
use crate::goalseek::{goal_seek, GoalSeekResult};
use crate::params::{ParameterSet, Scenario};
use crate::solver::SolverConfig;
use rayon::prelude::*;

/// Result of one scenario in a batch
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<GoalSeekResult, GoalSeekError>,
}

/// Runs goal seeks with a shared solver configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: SolverConfig,
}

impl ScenarioRunner {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Run a single goal seek
    pub fn run(&self, params: &ParameterSet) -> Result<GoalSeekResult, GoalSeekError> {
        goal_seek(params, &self.config)
    }

    /// Run every scenario in parallel; outcomes keep input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: self.run(&scenario.params),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        log::info!("batch complete: {} scenarios, {} failed", outcomes.len(), failed);

        outcomes
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawParameters;
    use approx::assert_abs_diff_eq;

    fn scenario(name: &str, num_years: i64, target_profit: f64, initial_rate: f64) -> Scenario {
        let params = ParameterSet::validate(&RawParameters {
            num_years,
            au_hours: 450.0,
            initial_tsn: 100.0,
            rate_escalation: 5.0,
            aic: 10.0,
            hsi_tsn: 1000.0,
            overhaul_tsn: 3000.0,
            hsi_cost: 50_000.0,
            overhaul_cost: 100_000.0,
            target_profit,
            initial_rate,
        })
        .unwrap();
        Scenario { name: name.to_string(), params }
    }

    #[test]
    fn test_batch_keeps_order() {
        let scenarios = vec![
            scenario("ten", 10, 3_000_000.0, 320.0),
            scenario("twenty", 20, 2_000_000.0, 250.0),
            scenario("thirty-five", 35, 3_000_000.0, 320.0),
        ];

        let runner = ScenarioRunner::default();
        let outcomes = runner.run_batch(&scenarios);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[1].name, "twenty");

        let rates: Vec<f64> = outcomes
            .iter()
            .map(|o| o.result.as_ref().unwrap().optimal_warranty_rate)
            .collect();
        assert_abs_diff_eq!(rates[0], 505.93820432563325, epsilon = 1e-6);
        assert_abs_diff_eq!(rates[1], 131.35669183835628, epsilon = 1e-6);
        assert_abs_diff_eq!(rates[2], 70.45631874177171, epsilon = 1e-6);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let scenarios = vec![scenario("a", 10, 3_000_000.0, 320.0), scenario("b", 15, 1_000_000.0, 100.0)];
        let runner = ScenarioRunner::default();

        let batch = runner.run_batch(&scenarios);
        for (outcome, scenario) in batch.iter().zip(&scenarios) {
            let single = runner.run(&scenario.params).unwrap();
            let batched = outcome.result.as_ref().unwrap();
            assert_eq!(batched.optimal_warranty_rate.to_bits(), single.optimal_warranty_rate.to_bits());
            assert_eq!(batched.iterations, single.iterations);
        }
    }

    #[test]
    fn test_failures_stay_per_scenario() {
        let runner = ScenarioRunner::new(SolverConfig { max_iterations: 1, ..Default::default() });
        let outcomes = runner.run_batch(&[scenario("tight", 10, 3_000_000.0, 320.0)]);
        assert!(outcomes[0].result.is_err());
        assert_eq!(runner.config().max_iterations, 1);
    }
}
