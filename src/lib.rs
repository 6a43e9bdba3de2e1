//! Warranty goal seek - maintenance warranty rate solver
//!
//! This library provides:
//! - Validated financial scenario parameters
//! - A deterministic year-by-year engine maintenance cash-flow model
//! - Newton-Raphson goal seek for the rate that earns a target cumulative profit
//! - Yearly run-out schedules and parallel batch scenarios

pub mod error;
pub mod goalseek;
pub mod params;
pub mod scenario;
pub mod simulation;
pub mod solver;

// Re-export commonly used types
pub use error::{GoalSeekError, NumericFailure, SolveError, ValidationError};
pub use goalseek::{goal_seek, goal_seek_raw, GoalSeekResult};
pub use params::{ParameterSet, RawParameters, Scenario};
pub use scenario::ScenarioRunner;
pub use simulation::{runout, simulate, RunoutSchedule};
pub use solver::{solve_rate, SolverConfig};
