//! Projection inputs and the scenario file loader

mod data;
mod loader;

pub use data::{ProjectionInput, Scenario, WithdrawalStrategy, MAX_AGE};
pub use loader::{load_scenarios, load_scenarios_from_reader, LoadError};
