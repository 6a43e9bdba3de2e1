//! Error types for validation, simulation and goal seeking

use std::fmt;
use thiserror::Error;

/// A parameter violated its field-level invariant.
///
/// `field` uses the caller-facing field name (`numYears`, `hsiTSN`, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} must be {requirement}")]
pub struct ValidationError {
    pub field: &'static str,
    pub requirement: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, requirement: &'static str) -> Self {
        Self { field, requirement }
    }
}

/// Intermediate quantity of the cash-flow model that can degenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    EscalatedRate,
    Revenue,
    YearProfit,
    CumulativeProfit,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::EscalatedRate => "escalated rate",
            Quantity::Revenue => "revenue",
            Quantity::YearProfit => "yearly profit",
            Quantity::CumulativeProfit => "cumulative profit",
        };
        f.write_str(name)
    }
}

/// How a value stopped being finite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFinite {
    Overflow,
    NaN,
}

impl NonFinite {
    pub fn classify(value: f64) -> Self {
        if value.is_nan() {
            NonFinite::NaN
        } else {
            NonFinite::Overflow
        }
    }
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonFinite::Overflow => f.write_str("overflowed"),
            NonFinite::NaN => f.write_str("is NaN"),
        }
    }
}

/// The simulator produced a non-finite intermediate value.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("{quantity} {kind} in year {year} (rate = {rate})")]
pub struct NumericFailure {
    pub quantity: Quantity,
    pub kind: NonFinite,
    /// 1-based simulation year
    pub year: u32,
    /// Rate the simulation was run at
    pub rate: f64,
}

/// Root-finding failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Simulation degenerated at an objective or derivative probe
    #[error("numeric failure during goal seek: {0}")]
    Numeric(#[from] NumericFailure),

    /// Forward-difference derivative was exactly zero
    #[error("derivative is zero at rate {rate} (iteration {iteration}); cannot continue")]
    DerivativeZero { rate: f64, iteration: u32 },

    /// Iteration budget exhausted without meeting the tolerance
    #[error("failed to converge after {iterations} iterations (last rate = {last_rate}, residual = {residual})")]
    NonConvergence {
        iterations: u32,
        last_rate: f64,
        residual: f64,
    },

    /// Solver configuration is unusable
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Any failure surfaced by the goal-seek orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoalSeekError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Numeric(#[from] NumericFailure),

    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl GoalSeekError {
    /// True when the caller can fix the failure by correcting its input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, GoalSeekError::Validation(_))
    }
}
