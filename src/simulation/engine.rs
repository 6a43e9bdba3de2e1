//! Year-by-year maintenance cash-flow model
//!
//! Revenue is hours flown times the escalated warranty rate plus the AIC
//! surcharge. Costs are the HSI and overhaul charges, each booked in the one
//! year where time since new first reaches its threshold.

use super::cashflows::{RunoutSchedule, YearCashflow};
use super::state::YearState;
use crate::error::{NonFinite, NumericFailure, Quantity};
use crate::params::ParameterSet;

/// Cumulative profit over all years at the given base rate.
///
/// Pure and allocation-free; fails on the first non-finite intermediate value.
pub fn simulate(rate: f64, params: &ParameterSet) -> Result<f64, NumericFailure> {
    let mut state = YearState::start(params);

    for _year in 1..=params.num_years() {
        state.advance_year(params);
        calculate_year(rate, params, &mut state)?;
    }

    Ok(state.cumulative_profit)
}

/// Run the model at `rate` and keep every year's cash flows.
///
/// The last row's cumulative profit is identical to [`simulate`].
pub fn runout(rate: f64, params: &ParameterSet) -> Result<RunoutSchedule, NumericFailure> {
    let mut schedule = RunoutSchedule::new(rate);
    let mut state = YearState::start(params);

    for _year in 1..=params.num_years() {
        state.advance_year(params);
        let row = calculate_year(rate, params, &mut state)?;
        schedule.add_year(row);
    }

    Ok(schedule)
}

/// Warranty rate in `year` (1-indexed) after compound escalation.
///
/// Year 1 is unescalated.
pub fn escalated_rate(rate: f64, params: &ParameterSet, year: u32) -> f64 {
    let growth = 1.0 + params.rate_escalation() / 100.0;
    rate * growth.powf(f64::from(year.saturating_sub(1)))
}

fn check(value: f64, quantity: Quantity, year: u32, rate: f64) -> Result<f64, NumericFailure> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericFailure {
            quantity,
            kind: NonFinite::classify(value),
            year,
            rate,
        })
    }
}

/// Calculate cash flows for the state's current year and roll profit forward
fn calculate_year(
    rate: f64,
    params: &ParameterSet,
    state: &mut YearState,
) -> Result<YearCashflow, NumericFailure> {
    let year = state.year;

    let year_rate = check(escalated_rate(rate, params, year), Quantity::EscalatedRate, year, rate)?;

    let engine_revenue = check(params.au_hours() * year_rate, Quantity::Revenue, year, rate)?;
    let aic_revenue = check(engine_revenue * params.aic() / 100.0, Quantity::Revenue, year, rate)?;
    let revenue = check(engine_revenue + aic_revenue, Quantity::Revenue, year, rate)?;

    let hsi_event = state.crossed(params.hsi_tsn());
    let overhaul_event = state.crossed(params.overhaul_tsn());

    let mut cost = 0.0;
    if hsi_event {
        cost += params.hsi_cost();
    }
    if overhaul_event {
        cost += params.overhaul_cost();
    }

    let profit = check(revenue - cost, Quantity::YearProfit, year, rate)?;
    state.cumulative_profit = check(
        state.cumulative_profit + profit,
        Quantity::CumulativeProfit,
        year,
        rate,
    )?;

    Ok(YearCashflow {
        year,
        tsn: state.tsn,
        escalated_rate: year_rate,
        engine_revenue,
        aic_revenue,
        revenue,
        hsi_event,
        overhaul_event,
        cost,
        profit,
        cumulative_profit: state.cumulative_profit,
    })
}
