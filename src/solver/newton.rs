//! Newton-Raphson goal seek with a forward-difference derivative

use super::config::SolverConfig;
use crate::error::{NumericFailure, SolveError};
use crate::params::ParameterSet;
use crate::simulation::simulate;
use serde::Serialize;

/// Converged root and the evaluation count it took
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub rate: f64,

    /// 1-based iteration at which convergence was detected
    pub iterations: u32,
}

/// Newton-Raphson root finder for objectives without an analytic derivative.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)` where
/// `f'(x) ≈ (f(x + h) - f(x)) / h` with `h = derivative_step`.
/// Convergence is tested on the current iterate before any update, so the
/// reported iteration count equals the number of objective evaluations at
/// distinct iterates.
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver {
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find `x` such that `|f(x)| < tolerance`, starting from `x0`.
    ///
    /// Any evaluation failure (at the iterate or the derivative probe)
    /// aborts the search immediately.
    pub fn find_root<F>(&self, f: F, x0: f64) -> Result<Solution, SolveError>
    where
        F: Fn(f64) -> Result<f64, NumericFailure>,
    {
        self.config.validate()?;

        let step = self.config.derivative_step;
        let mut x = x0;
        let mut residual = f64::NAN;

        for iteration in 1..=self.config.max_iterations {
            let f_val = f(x)?;
            residual = f_val;

            log::debug!("iteration {}: rate = {}, residual = {}", iteration, x, f_val);

            if f_val.abs() < self.config.tolerance {
                return Ok(Solution { rate: x, iterations: iteration });
            }

            let f_prime = (f(x + step)? - f_val) / step;
            if f_prime == 0.0 {
                return Err(SolveError::DerivativeZero { rate: x, iteration });
            }

            x -= f_val / f_prime;
        }

        Err(SolveError::NonConvergence {
            iterations: self.config.max_iterations,
            last_rate: x,
            residual,
        })
    }
}

impl Default for NewtonRaphsonSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Find the rate whose simulated cumulative profit equals `target_profit`
pub fn solve_rate(
    target_profit: f64,
    params: &ParameterSet,
    initial_guess: f64,
    config: &SolverConfig,
) -> Result<Solution, SolveError> {
    let solver = NewtonRaphsonSolver::new(*config);
    solver.find_root(|rate| Ok(simulate(rate, params)? - target_profit), initial_guess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NonFinite, Quantity};
    use crate::params::RawParameters;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn reference_params(num_years: i64, target_profit: f64, initial_rate: f64) -> ParameterSet {
        ParameterSet::validate(&RawParameters {
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
        .unwrap()
    }

    #[test]
    fn test_square_root_of_two() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let solution = solver.find_root(|x| Ok(x * x - 2.0), 1.0).unwrap();
        assert_abs_diff_eq!(solution.rate, std::f64::consts::SQRT_2, epsilon = 1e-8);
        assert!(solution.iterations > 1);
    }

    #[test]
    fn test_converged_guess_takes_one_iteration() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let solution = solver.find_root(|x| Ok(x - 3.0), 3.0).unwrap();
        assert_eq!(solution, Solution { rate: 3.0, iterations: 1 });
    }

    #[test]
    fn test_derivative_zero() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let err = solver.find_root(|_| Ok(5.0), 1.0).unwrap_err();
        assert_eq!(err, SolveError::DerivativeZero { rate: 1.0, iteration: 1 });
    }

    #[test]
    fn test_non_convergence_reports_budget() {
        let solver = NewtonRaphsonSolver::new(SolverConfig {
            max_iterations: 2,
            ..Default::default()
        });
        match solver.find_root(|x| Ok(x * x - 2.0), 100.0) {
            Err(SolveError::NonConvergence { iterations, .. }) => assert_eq!(iterations, 2),
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_budget() {
        let solver = NewtonRaphsonSolver::new(SolverConfig {
            max_iterations: 0,
            ..Default::default()
        });
        let err = solver.find_root(|x| Ok(x), 0.0).unwrap_err();
        assert!(matches!(err, SolveError::NonConvergence { iterations: 0, .. }));
    }

    #[test]
    fn test_numeric_failure_propagates() {
        let failure = NumericFailure {
            quantity: Quantity::Revenue,
            kind: NonFinite::Overflow,
            year: 1,
            rate: 2.0,
        };
        // Objective is fine at the iterate but fails at the derivative probe
        let solver = NewtonRaphsonSolver::with_defaults();
        let err = solver
            .find_root(|x| if x > 1.0 { Err(failure) } else { Ok(x - 5.0) }, 1.0)
            .unwrap_err();
        assert_eq!(err, SolveError::Numeric(failure));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let solver = NewtonRaphsonSolver::new(SolverConfig {
            tolerance: -1.0,
            ..Default::default()
        });
        assert!(matches!(
            solver.find_root(|x| Ok(x), 0.0),
            Err(SolveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reference_ten_years() {
        let params = reference_params(10, 3_000_000.0, 320.0);
        let solution = solve_rate(3_000_000.0, &params, 320.0, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(solution.rate, 505.93820432563325, epsilon = 1e-6);
        assert_eq!(solution.iterations, 3);
    }

    #[test]
    fn test_reference_twenty_years() {
        let params = reference_params(20, 2_000_000.0, 250.0);
        let solution = solve_rate(2_000_000.0, &params, 250.0, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(solution.rate, 131.35669183835628, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_thirty_five_years() {
        let params = reference_params(35, 3_000_000.0, 320.0);
        let solution = solve_rate(3_000_000.0, &params, 320.0, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(solution.rate, 70.45631874177171, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn prop_solved_rate_hits_target(
            num_years in 1i64..40,
            target in 1e4f64..1e7,
            guess in 10.0f64..1000.0,
        ) {
            let params = reference_params(num_years, target, guess);
            let config = SolverConfig::default();
            if let Ok(solution) = solve_rate(target, &params, guess, &config) {
                let profit = simulate(solution.rate, &params).unwrap();
                prop_assert!((profit - target).abs() < config.tolerance);
            }
        }
    }
}
