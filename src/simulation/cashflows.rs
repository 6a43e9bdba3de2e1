//! Yearly cash-flow records for run-out schedules

use serde::{Deserialize, Serialize};

/// One year of the maintenance cash-flow model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCashflow {
    pub year: u32,

    /// Time since new at the end of the year
    pub tsn: f64,

    /// Warranty rate after compound escalation
    pub escalated_rate: f64,

    pub engine_revenue: f64,
    pub aic_revenue: f64,

    /// Engine revenue plus AIC surcharge
    pub revenue: f64,

    /// Hot-section inspection fell due this year
    pub hsi_event: bool,

    /// Overhaul fell due this year
    pub overhaul_event: bool,

    /// Maintenance cost incurred this year
    pub cost: f64,

    pub profit: f64,
    pub cumulative_profit: f64,
}

/// Complete run-out of a scenario at a fixed rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunoutSchedule {
    /// Base (year 1) warranty rate the schedule was run at
    pub rate: f64,

    /// One row per simulated year
    pub years: Vec<YearCashflow>,
}

impl RunoutSchedule {
    pub fn new(rate: f64) -> Self {
        Self { rate, years: Vec::new() }
    }

    pub fn add_year(&mut self, row: YearCashflow) {
        self.years.push(row);
    }

    /// Cumulative profit at the end of the run-out
    pub fn cumulative_profit(&self) -> f64 {
        self.years.last().map(|r| r.cumulative_profit).unwrap_or(0.0)
    }

    /// Get summary statistics
    pub fn summary(&self) -> RunoutSummary {
        let total_revenue: f64 = self.years.iter().map(|r| r.revenue).sum();
        let total_cost: f64 = self.years.iter().map(|r| r.cost).sum();

        RunoutSummary {
            total_years: self.years.len() as u32,
            total_revenue,
            total_cost,
            cumulative_profit: self.cumulative_profit(),
            hsi_year: self.years.iter().find(|r| r.hsi_event).map(|r| r.year),
            overhaul_year: self.years.iter().find(|r| r.overhaul_event).map(|r| r.year),
        }
    }
}

/// Summary statistics for a run-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunoutSummary {
    pub total_years: u32,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub cumulative_profit: f64,
    pub hsi_year: Option<u32>,
    pub overhaul_year: Option<u32>,
}
