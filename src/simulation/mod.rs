//! Deterministic cash-flow simulation

mod cashflows;
mod engine;
mod state;

pub use cashflows::{RunoutSchedule, RunoutSummary, YearCashflow};
pub use engine::{escalated_rate, runout, simulate};
pub use state::YearState;
