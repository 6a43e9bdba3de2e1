//! Root finding for the warranty rate

mod config;
mod newton;

pub use config::{SolverConfig, DEFAULT_DERIVATIVE_STEP, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use newton::{solve_rate, NewtonRaphsonSolver, Solution};
