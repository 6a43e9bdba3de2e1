//! Scenario parameters, validation and batch loading

mod data;
pub mod loader;

pub use data::{ParameterSet, RawParameters};
pub use loader::{load_scenarios, load_scenarios_from_reader, LoadError, Scenario};
