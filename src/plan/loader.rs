//! Load projection scenarios from CSV

use super::{ProjectionInput, Scenario, WithdrawalStrategy};
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Failure reading a scenario file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read scenario CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario '{name}': unknown WithdrawalMode '{mode}' (expected Fixed, InflationLinked or Percent)")]
    UnknownWithdrawalMode { name: String, mode: String },
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CurrentAge")]
    current_age: u32,
    #[serde(rename = "RetirementAge")]
    retirement_age: u32,
    #[serde(rename = "LifeExpectancy")]
    life_expectancy: u32,
    #[serde(rename = "StartingBalance")]
    starting_balance: f64,
    #[serde(rename = "AnnualContribution", default)]
    annual_contribution: f64,
    #[serde(rename = "ExpectedReturn", default)]
    expected_return: f64,
    #[serde(rename = "WithdrawalMode")]
    withdrawal_mode: String,
    #[serde(rename = "Withdrawal", default)]
    withdrawal: f64,
    #[serde(rename = "InflationRate", default)]
    inflation_rate: f64,
}

impl CsvRow {
    fn to_scenario(self) -> Result<Scenario, LoadError> {
        let withdrawal = match self.withdrawal_mode.trim() {
            "Fixed" => WithdrawalStrategy::FixedAmount { annual_amount: self.withdrawal },
            "InflationLinked" => WithdrawalStrategy::InflationLinked { initial_amount: self.withdrawal },
            "Percent" => WithdrawalStrategy::PercentOfBalance { rate: self.withdrawal },
            other => {
                return Err(LoadError::UnknownWithdrawalMode {
                    name: self.name,
                    mode: other.to_string(),
                })
            }
        };

        let input = ProjectionInput {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            life_expectancy: self.life_expectancy,
            starting_balance: self.starting_balance,
            annual_contribution: self.annual_contribution,
            expected_return_rate: self.expected_return,
            withdrawal,
            inflation_rate: self.inflation_rate,
        };

        Ok(Scenario::new(self.name, input))
    }
}

/// Load all scenarios from a CSV file
///
/// Rows are only parsed here; range checks happen when each scenario is projected.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>, LoadError> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    log::debug!("loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}
