//! Solver configuration

use crate::error::SolveError;
use serde::{Deserialize, Serialize};
use std::env;

/// Default convergence tolerance on the profit residual
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Forward-difference step for the numerical derivative
pub const DEFAULT_DERIVATIVE_STEP: f64 = 1e-6;

/// Configuration for a goal-seek run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Converged when |simulated profit - target| is below this
    pub tolerance: f64,

    /// Maximum number of objective evaluations
    pub max_iterations: u32,

    /// Step used for the forward-difference derivative
    pub derivative_step: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative_step: DEFAULT_DERIVATIVE_STEP,
        }
    }
}

impl SolverConfig {
    /// Defaults overridden by `GOALSEEK_TOLERANCE`, `GOALSEEK_MAX_ITERATIONS`
    /// and `GOALSEEK_DERIVATIVE_STEP`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            tolerance: parse_override(&lookup, "GOALSEEK_TOLERANCE").unwrap_or(defaults.tolerance),
            max_iterations: parse_override(&lookup, "GOALSEEK_MAX_ITERATIONS")
                .unwrap_or(defaults.max_iterations),
            derivative_step: parse_override(&lookup, "GOALSEEK_DERIVATIVE_STEP")
                .unwrap_or(defaults.derivative_step),
        }
    }

    /// Copy with caller overrides applied
    pub fn with_overrides(&self, tolerance: Option<f64>, max_iterations: Option<u32>) -> Self {
        Self {
            tolerance: tolerance.unwrap_or(self.tolerance),
            max_iterations: max_iterations.unwrap_or(self.max_iterations),
            ..*self
        }
    }

    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolveError::InvalidConfig("tolerance must be > 0"));
        }
        if !self.derivative_step.is_finite() || self.derivative_step <= 0.0 {
            return Err(SolveError::InvalidConfig("derivative_step must be > 0"));
        }
        Ok(())
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a valid number", key, value);
            None
        }
    }
}
