//! Running state carried from one projection year to the next

use crate::plan::ProjectionInput;

/// State of the account at the start of a projection year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Projection year (0-indexed)
    pub year_index: u32,

    /// Attained age during this year
    pub age: u32,

    /// Beginning of year balance (prior year's closing balance)
    pub balance: f64,

    /// Set once withdrawals have exhausted the account; never cleared
    pub depleted: bool,

    /// Completed retirement years, drives inflation escalation of withdrawals
    pub years_retired: u32,
}

impl ProjectionState {
    /// Initialize state at the first projection year
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            year_index: 0,
            age: input.current_age,
            balance: input.starting_balance,
            depleted: false,
            years_retired: 0,
        }
    }

    /// Whether withdrawals (rather than contributions) apply this year
    pub fn is_retired(&self, input: &ProjectionInput) -> bool {
        self.age >= input.retirement_age
    }

    /// Carry the closing balance forward and move to the next year
    pub fn advance_year(&mut self, closing_balance: f64, depleted: bool) {
        self.balance = closing_balance;
        self.depleted = self.depleted || depleted;
        self.year_index = self.year_index.saturating_add(1);
        self.age = self.age.saturating_add(1);
    }
}
