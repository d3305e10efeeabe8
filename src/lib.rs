//! Retirement Planner - year-by-year projection engine for retirement savings
//!
//! This library provides:
//! - Accumulation and drawdown projections from current age to life expectancy
//! - Fixed, inflation-linked and living annuity (percent of balance) withdrawals
//! - Depletion detection and summary figures for reports and charts
//! - Closed-form annuity helpers (future value, sustainable withdrawal)
//! - Parallel multi-scenario comparison

pub mod error;
pub mod plan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ComputationWarning, InvalidInputError};
pub use plan::{ProjectionInput, Scenario, WithdrawalStrategy};
pub use projection::{
    first_depleted_year, project, ProjectionEngine, ProjectionResult, ProjectionSummary, YearRecord,
};
pub use scenario::{run_scenarios, ScenarioOutcome, ScenarioRunner};
