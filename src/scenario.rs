//! Scenario runner for comparing projections side by side
//!
//! Every projection is independent, so batches fan out across threads with
//! rayon and come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::InvalidInputError;
use crate::plan::{ProjectionInput, Scenario, WithdrawalStrategy};
use crate::projection::{project, ProjectionResult, ProjectionSummary};

/// Result of projecting one named scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionResult, InvalidInputError>,
}

impl ScenarioOutcome {
    pub fn summary(&self) -> Option<ProjectionSummary> {
        self.result.as_ref().ok().map(|r| r.summary())
    }

    /// Flatten into a serializable row for JSON output
    pub fn to_report(&self) -> ScenarioReport {
        match &self.result {
            Ok(result) => ScenarioReport {
                name: self.name.clone(),
                summary: Some(result.summary()),
                warnings: result.warnings().iter().map(|w| w.to_string()).collect(),
                error: None,
            },
            Err(e) => ScenarioReport {
                name: self.name.clone(),
                summary: None,
                warnings: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Serializable view of a [`ScenarioOutcome`]
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ProjectionSummary>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Project a single named scenario
pub fn run_scenario(scenario: &Scenario) -> ScenarioOutcome {
    ScenarioOutcome {
        name: scenario.name.clone(),
        result: project(&scenario.input),
    }
}

/// Project independent scenarios in parallel, preserving input order
pub fn run_scenarios(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    log::debug!("running {} scenarios", scenarios.len());
    scenarios.par_iter().map(run_scenario).collect()
}

/// Runs batches of projections around a base input
///
/// # Example
/// ```
/// use retirement_planner::{ProjectionInput, ScenarioRunner, WithdrawalStrategy};
///
/// let base = ProjectionInput::new(60, 65, 90, 1_000_000.0)
///     .with_withdrawal(WithdrawalStrategy::PercentOfBalance { rate: 0.05 });
/// let runner = ScenarioRunner::new(base);
///
/// for outcome in runner.run_return_rates(&[0.04, 0.06, 0.08]) {
///     assert!(outcome.result.is_ok());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_input: ProjectionInput,
}

impl ScenarioRunner {
    pub fn new(base_input: ProjectionInput) -> Self {
        Self { base_input }
    }

    /// Project the base input unchanged
    pub fn run_base(&self) -> Result<ProjectionResult, InvalidInputError> {
        project(&self.base_input)
    }

    /// Project many scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        run_scenarios(scenarios)
    }

    /// Re-run the base input under each expected return rate
    pub fn run_return_rates(&self, rates: &[f64]) -> Vec<ScenarioOutcome> {
        let scenarios: Vec<Scenario> = rates
            .iter()
            .map(|&rate| {
                Scenario::new(
                    format!("return {:.2}%", rate * 100.0),
                    self.base_input.clone().with_return_rate(rate),
                )
            })
            .collect();
        self.run_batch(&scenarios)
    }

    /// Re-run the base input under each withdrawal strategy
    pub fn run_withdrawal_strategies(
        &self,
        strategies: &[(String, WithdrawalStrategy)],
    ) -> Vec<ScenarioOutcome> {
        let scenarios: Vec<Scenario> = strategies
            .iter()
            .map(|(name, strategy)| {
                Scenario::new(name.clone(), self.base_input.clone().with_withdrawal(*strategy))
            })
            .collect();
        self.run_batch(&scenarios)
    }

    /// Get reference to the base input for inspection
    pub fn base(&self) -> &ProjectionInput {
        &self.base_input
    }

    /// Get mutable reference to the base input for customization
    pub fn base_mut(&mut self) -> &mut ProjectionInput {
        &mut self.base_input
    }
}
