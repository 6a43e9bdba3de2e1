//! Goal seek: find the warranty rate that earns the target cumulative profit
//!
//! Runs the baseline simulation at the caller's initial rate, solves for the
//! target, then re-simulates at the solved rate. Any failure aborts the whole
//! run; partial results are never returned.

use crate::error::GoalSeekError;
use crate::params::{ParameterSet, RawParameters};
use crate::simulation::simulate;
use crate::solver::{solve_rate, SolverConfig};
use serde::Serialize;
use std::time::Instant;

/// Outcome of a successful goal seek
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSeekResult {
    /// Rate at which cumulative profit meets the target
    pub optimal_warranty_rate: f64,

    /// Objective evaluations until convergence
    pub iterations: u32,

    /// Cumulative profit at the initial rate
    pub baseline_profit: f64,

    /// Cumulative profit at the solved rate
    pub final_profit: f64,

    /// Wall-clock time of the whole run
    pub execution_time_ms: f64,
}

/// Goal seek on validated parameters, seeded with `initialRate`
pub fn goal_seek(params: &ParameterSet, config: &SolverConfig) -> Result<GoalSeekResult, GoalSeekError> {
    let start = Instant::now();

    let baseline_profit = simulate(params.initial_rate(), params).map_err(|e| {
        log::warn!("baseline simulation failed: {}", e);
        e
    })?;

    let solution = solve_rate(params.target_profit(), params, params.initial_rate(), config).map_err(|e| {
        log::warn!("goal seek failed: {}", e);
        e
    })?;

    let final_profit = simulate(solution.rate, params)?;
    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "goal seek converged in {} iterations: rate {:.6} -> {:.6}, profit {:.2} -> {:.2}",
        solution.iterations,
        params.initial_rate(),
        solution.rate,
        baseline_profit,
        final_profit,
    );

    Ok(GoalSeekResult {
        optimal_warranty_rate: solution.rate,
        iterations: solution.iterations,
        baseline_profit,
        final_profit,
        execution_time_ms,
    })
}

/// Validate caller input, then goal seek
pub fn goal_seek_raw(raw: &RawParameters, config: &SolverConfig) -> Result<GoalSeekResult, GoalSeekError> {
    let params = ParameterSet::validate(raw).map_err(|e| {
        log::warn!("rejected parameters: {}", e);
        e
    })?;
    goal_seek(&params, config)
}
