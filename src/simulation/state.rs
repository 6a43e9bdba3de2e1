//! Per-year stepping state for a single simulation pass

use crate::params::ParameterSet;

/// State of the engine at a point in the simulation.
///
/// Lives only for one pass; nothing here outlives `simulate` or `runout`.
#[derive(Debug, Clone, Copy)]
pub struct YearState {
    /// Current simulation year (1-indexed, 0 before the first advance)
    pub year: u32,

    /// Time since new at the end of the current year
    pub tsn: f64,

    /// Time since new at the end of the prior year (initial TSN for year 1)
    pub prior_tsn: f64,

    /// Running sum of yearly profit
    pub cumulative_profit: f64,
}

impl YearState {
    /// State before year 1
    pub fn start(params: &ParameterSet) -> Self {
        Self {
            year: 0,
            tsn: params.initial_tsn(),
            prior_tsn: params.initial_tsn(),
            cumulative_profit: 0.0,
        }
    }

    /// Advance to next year
    pub fn advance_year(&mut self, params: &ParameterSet) {
        self.year += 1;
        self.prior_tsn = self.tsn;
        self.tsn = params.initial_tsn() + params.au_hours() * f64::from(self.year);
    }

    /// Whether TSN crossed `threshold` during the current year.
    ///
    /// TSN never decreases, so this is true in at most one year.
    pub fn crossed(&self, threshold: f64) -> bool {
        self.prior_tsn < threshold && self.tsn >= threshold
    }
}
