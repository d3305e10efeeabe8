//! Error and warning types for the projection engine
//!
//! Invalid input is rejected before any year is simulated. Depletion is not an
//! error: it is reported as data through [`ComputationWarning`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `ProjectionInput` field failed validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("retirement_age ({retirement_age}) must not be below current_age ({current_age})")]
    RetirementBeforeCurrentAge { current_age: u32, retirement_age: u32 },

    #[error("life_expectancy ({life_expectancy}) must not be below retirement_age ({retirement_age})")]
    LifeExpectancyBeforeRetirement { retirement_age: u32, life_expectancy: u32 },

    #[error("starting_balance must be non-negative, got {0}")]
    NegativeStartingBalance(f64),

    #[error("annual_contribution must be non-negative, got {0}")]
    NegativeContribution(f64),

    #[error("withdrawal {field} must be non-negative, got {value}")]
    NegativeWithdrawal { field: &'static str, value: f64 },

    #[error("expected_return_rate must be greater than -1.0 (total loss), got {0}")]
    ReturnRateBelowTotalLoss(f64),

    #[error("inflation_rate must be greater than -1.0, got {0}")]
    InflationRateBelowTotalLoss(f64),

    #[error("{field} ({age}) exceeds the maximum supported age {max}")]
    AgeAboveMaximum { field: &'static str, age: u32, max: u32 },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

impl InvalidInputError {
    /// Name of the input field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            InvalidInputError::RetirementBeforeCurrentAge { .. } => "retirement_age",
            InvalidInputError::LifeExpectancyBeforeRetirement { .. } => "life_expectancy",
            InvalidInputError::NegativeStartingBalance(_) => "starting_balance",
            InvalidInputError::NegativeContribution(_) => "annual_contribution",
            InvalidInputError::NegativeWithdrawal { field, .. } => *field,
            InvalidInputError::ReturnRateBelowTotalLoss(_) => "expected_return_rate",
            InvalidInputError::InflationRateBelowTotalLoss(_) => "inflation_rate",
            InvalidInputError::AgeAboveMaximum { field, .. } => *field,
            InvalidInputError::NonFinite { field, .. } => *field,
        }
    }
}

/// Non-fatal conditions surfaced alongside a completed projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputationWarning {
    /// Funds ran out before life expectancy
    EarlyDepletion {
        year_index: u32,
        age: u32,
        life_expectancy: u32,
    },
}

impl std::fmt::Display for ComputationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputationWarning::EarlyDepletion { age, life_expectancy, .. } => write!(
                f,
                "funds are depleted at age {} ({} years before life expectancy {})",
                age,
                life_expectancy.saturating_sub(*age),
                life_expectancy
            ),
        }
    }
}
