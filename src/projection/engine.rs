//! Core projection engine for yearly balance projections

use super::cashflows::{ProjectionResult, YearRecord};
use super::state::ProjectionState;
use crate::error::InvalidInputError;
use crate::plan::ProjectionInput;

/// Main projection engine, holding an already validated input
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    input: ProjectionInput,
}

impl ProjectionEngine {
    /// Validate the input and build an engine for it
    pub fn new(input: ProjectionInput) -> Result<Self, InvalidInputError> {
        input.validate()?;
        Ok(Self { input })
    }

    pub fn input(&self) -> &ProjectionInput {
        &self.input
    }

    /// Run the projection from current age to life expectancy inclusive
    pub fn run(&self) -> ProjectionResult {
        let input = &self.input;
        log::debug!(
            "projecting ages {}..={} (retire at {}), starting balance {:.2}",
            input.current_age,
            input.life_expectancy,
            input.retirement_age,
            input.starting_balance
        );

        let mut state = ProjectionState::from_input(input);
        let mut records = Vec::with_capacity(input.horizon_years() as usize);

        for _ in 0..input.horizon_years() {
            let row = self.calculate_year(&mut state);

            if row.depleted && !state.depleted {
                log::debug!(
                    "funds depleted at age {} (year {}), final withdrawal {:.2}",
                    row.age,
                    row.year_index,
                    row.withdrawal_amount
                );
            }

            state.advance_year(row.closing_balance, row.depleted);
            records.push(row);
        }

        ProjectionResult::new(input.clone(), records)
    }

    /// Calculate the balance roll-forward for a single year
    fn calculate_year(&self, state: &mut ProjectionState) -> YearRecord {
        let input = &self.input;
        let mut row = YearRecord::new(state.year_index, state.age);
        row.opening_balance = state.balance;

        // Nothing moves once the account is exhausted
        if state.depleted {
            row.depleted = true;
            return row;
        }

        row.growth_amount = row.opening_balance * input.expected_return_rate;

        if state.is_retired(input) {
            let available = row.available_balance();
            let requested = input.withdrawal.requested_amount(
                available,
                state.years_retired,
                input.inflation_rate,
            );

            if requested > 0.0 && requested >= available {
                row.withdrawal_amount = available.max(0.0);
                row.depleted = true;
            } else {
                row.withdrawal_amount = requested;
            }
            state.years_retired += 1;
        } else {
            row.contribution_amount = input.annual_contribution;
        }

        row.closing_balance = if row.depleted {
            0.0
        } else {
            (row.available_balance() - row.withdrawal_amount).max(0.0)
        };

        log::trace!(
            "age {}: open {:.2} growth {:.2} contrib {:.2} withdraw {:.2} close {:.2}",
            row.age,
            row.opening_balance,
            row.growth_amount,
            row.contribution_amount,
            row.withdrawal_amount,
            row.closing_balance
        );

        row
    }
}

/// Validate `input` and project it year by year
pub fn project(input: &ProjectionInput) -> Result<ProjectionResult, InvalidInputError> {
    Ok(ProjectionEngine::new(input.clone())?.run())
}
