//! Financial scenario parameters and their validation

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Caller-supplied scenario, exactly as decoded from JSON.
///
/// Nothing here is trusted; convert with [`ParameterSet::validate`].
/// `num_years` is signed so that zero and negative values reach validation
/// instead of failing at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameters {
    /// Number of simulated years
    pub num_years: i64,

    /// Annual utilisation hours
    pub au_hours: f64,

    /// Engine time since new at the start of year 1
    #[serde(rename = "initialTSN")]
    pub initial_tsn: f64,

    /// Annual compound rate escalation, in percent
    pub rate_escalation: f64,

    /// Additional coverage surcharge, in percent of engine revenue
    pub aic: f64,

    /// TSN at which the hot-section inspection falls due
    #[serde(rename = "hsiTSN")]
    pub hsi_tsn: f64,

    /// TSN at which the overhaul falls due
    #[serde(rename = "overhaulTSN")]
    pub overhaul_tsn: f64,

    pub hsi_cost: f64,
    pub overhaul_cost: f64,

    /// Cumulative profit the goal seek aims for
    pub target_profit: f64,

    /// Starting warranty rate (per hour); also seeds the root finder
    pub initial_rate: f64,
}

/// Validated, immutable financial scenario.
///
/// The only way to obtain one is through validation, so every accessor
/// returns a value that satisfies its invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    num_years: u32,
    au_hours: f64,
    #[serde(rename = "initialTSN")]
    initial_tsn: f64,
    rate_escalation: f64,
    aic: f64,
    #[serde(rename = "hsiTSN")]
    hsi_tsn: f64,
    #[serde(rename = "overhaulTSN")]
    overhaul_tsn: f64,
    hsi_cost: f64,
    overhaul_cost: f64,
    target_profit: f64,
    initial_rate: f64,
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "finite"));
    }
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "positive"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "finite"));
    }
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "non-negative"))
    }
}

fn percentage(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "between 0 and 100"))
    }
}

impl ParameterSet {
    /// Validate raw input, reporting the first violated field.
    ///
    /// Fields are checked in a fixed order: numYears, auHours, initialTSN,
    /// rateEscalation, aic, hsiTSN, overhaulTSN, hsiCost, overhaulCost,
    /// targetProfit, initialRate.
    pub fn validate(raw: &RawParameters) -> Result<Self, ValidationError> {
        if raw.num_years <= 0 {
            return Err(ValidationError::new("numYears", "positive"));
        }
        let num_years = u32::try_from(raw.num_years)
            .map_err(|_| ValidationError::new("numYears", "at most 4294967295"))?;

        Ok(Self {
            num_years,
            au_hours: positive("auHours", raw.au_hours)?,
            initial_tsn: non_negative("initialTSN", raw.initial_tsn)?,
            rate_escalation: non_negative("rateEscalation", raw.rate_escalation)?,
            aic: percentage("aic", raw.aic)?,
            hsi_tsn: positive("hsiTSN", raw.hsi_tsn)?,
            overhaul_tsn: positive("overhaulTSN", raw.overhaul_tsn)?,
            hsi_cost: non_negative("hsiCost", raw.hsi_cost)?,
            overhaul_cost: non_negative("overhaulCost", raw.overhaul_cost)?,
            target_profit: positive("targetProfit", raw.target_profit)?,
            initial_rate: positive("initialRate", raw.initial_rate)?,
        })
    }

    /// Convert back to the caller-facing representation
    pub fn to_raw(&self) -> RawParameters {
        RawParameters {
            num_years: i64::from(self.num_years),
            au_hours: self.au_hours,
            initial_tsn: self.initial_tsn,
            rate_escalation: self.rate_escalation,
            aic: self.aic,
            hsi_tsn: self.hsi_tsn,
            overhaul_tsn: self.overhaul_tsn,
            hsi_cost: self.hsi_cost,
            overhaul_cost: self.overhaul_cost,
            target_profit: self.target_profit,
            initial_rate: self.initial_rate,
        }
    }

    /// Copy with a different target profit, re-validated
    pub fn with_target_profit(&self, target_profit: f64) -> Result<Self, ValidationError> {
        Self::validate(&RawParameters { target_profit, ..self.to_raw() })
    }

    /// Copy with a different initial rate, re-validated
    pub fn with_initial_rate(&self, initial_rate: f64) -> Result<Self, ValidationError> {
        Self::validate(&RawParameters { initial_rate, ..self.to_raw() })
    }

    pub fn num_years(&self) -> u32 {
        self.num_years
    }

    pub fn au_hours(&self) -> f64 {
        self.au_hours
    }

    pub fn initial_tsn(&self) -> f64 {
        self.initial_tsn
    }

    /// Annual escalation in percent
    pub fn rate_escalation(&self) -> f64 {
        self.rate_escalation
    }

    /// AIC surcharge in percent
    pub fn aic(&self) -> f64 {
        self.aic
    }

    pub fn hsi_tsn(&self) -> f64 {
        self.hsi_tsn
    }

    pub fn overhaul_tsn(&self) -> f64 {
        self.overhaul_tsn
    }

    pub fn hsi_cost(&self) -> f64 {
        self.hsi_cost
    }

    pub fn overhaul_cost(&self) -> f64 {
        self.overhaul_cost
    }

    pub fn target_profit(&self) -> f64 {
        self.target_profit
    }

    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }
}

impl TryFrom<RawParameters> for ParameterSet {
    type Error = ValidationError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::validate(&raw)
    }
}
