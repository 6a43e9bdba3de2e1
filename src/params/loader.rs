//! Load batches of scenarios from CSV

use super::{ParameterSet, RawParameters};
use crate::error::ValidationError;
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// A named, validated scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub params: ParameterSet,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read scenarios: {0}")]
    Csv(#[from] csv::Error),

    /// `row` is the 1-based data row (header excluded)
    #[error("scenario row {row} is invalid: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

/// Raw CSV row; headers use the JSON field names
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    scenario: Option<String>,
    #[serde(rename = "numYears")]
    num_years: i64,
    #[serde(rename = "auHours")]
    au_hours: f64,
    #[serde(rename = "initialTSN")]
    initial_tsn: f64,
    #[serde(rename = "rateEscalation")]
    rate_escalation: f64,
    #[serde(rename = "aic")]
    aic: f64,
    #[serde(rename = "hsiTSN")]
    hsi_tsn: f64,
    #[serde(rename = "overhaulTSN")]
    overhaul_tsn: f64,
    #[serde(rename = "hsiCost")]
    hsi_cost: f64,
    #[serde(rename = "overhaulCost")]
    overhaul_cost: f64,
    #[serde(rename = "targetProfit")]
    target_profit: f64,
    #[serde(rename = "initialRate")]
    initial_rate: f64,
}

impl CsvRow {
    fn to_scenario(self, row: usize) -> Result<Scenario, LoadError> {
        let raw = RawParameters {
            num_years: self.num_years,
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
        };
        let params = ParameterSet::validate(&raw).map_err(|source| LoadError::Invalid { row, source })?;

        let name = match self.scenario {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("scenario-{}", row),
        };

        Ok(Scenario { name, params })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., stdin, string buffer)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>, LoadError> {
    let mut scenarios = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario(idx + 1)?);
    }

    log::debug!("loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}
