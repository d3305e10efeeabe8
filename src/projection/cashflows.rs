//! Yearly output records and the projection result

use serde::{Deserialize, Serialize};

use super::annuity::{real_value, AnnuityIncome};
use crate::error::ComputationWarning;
use crate::plan::ProjectionInput;

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    // Timing
    pub year_index: u32,
    pub age: u32,

    // Balance roll-forward
    pub opening_balance: f64,
    pub growth_amount: f64,
    pub contribution_amount: f64,
    pub withdrawal_amount: f64,
    pub closing_balance: f64,

    /// True from the year the balance is exhausted onward
    pub depleted: bool,
}

impl YearRecord {
    /// Create an empty record for the given year
    pub fn new(year_index: u32, age: u32) -> Self {
        Self {
            year_index,
            age,
            opening_balance: 0.0,
            growth_amount: 0.0,
            contribution_amount: 0.0,
            withdrawal_amount: 0.0,
            closing_balance: 0.0,
            depleted: false,
        }
    }

    /// Balance available for withdrawal (post-growth, post-contribution)
    pub fn available_balance(&self) -> f64 {
        self.opening_balance + self.growth_amount + self.contribution_amount
    }
}

/// Complete projection result, chronological and immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    input: ProjectionInput,
    records: Vec<YearRecord>,
}

impl ProjectionResult {
    pub(crate) fn new(input: ProjectionInput, records: Vec<YearRecord>) -> Self {
        Self { input, records }
    }

    /// Input that produced this result
    pub fn input(&self) -> &ProjectionInput {
        &self.input
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn final_balance(&self) -> f64 {
        self.records.last().map(|r| r.closing_balance).unwrap_or(0.0)
    }

    /// Age in the first depleted year, `None` if funds last the full horizon
    pub fn depletion_age(&self) -> Option<u32> {
        first_depleted_year(self).and_then(|idx| self.records.get(idx as usize).map(|r| r.age))
    }

    /// `(age, closing_balance)` pairs for a balance timeline chart
    pub fn balance_series(&self) -> Vec<(u32, f64)> {
        self.records.iter().map(|r| (r.age, r.closing_balance)).collect()
    }

    /// Record for the first year at or after retirement age
    pub fn retirement_record(&self) -> Option<&YearRecord> {
        self.records.iter().find(|r| r.age >= self.input.retirement_age)
    }

    /// Non-fatal conditions a caller should surface
    pub fn warnings(&self) -> Vec<ComputationWarning> {
        let mut warnings = Vec::new();

        if let Some(idx) = first_depleted_year(self) {
            let record = &self.records[idx as usize];
            if record.age < self.input.life_expectancy {
                warnings.push(ComputationWarning::EarlyDepletion {
                    year_index: record.year_index,
                    age: record.age,
                    life_expectancy: self.input.life_expectancy,
                });
            }
        }

        warnings
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_contributions: f64 = self.records.iter().map(|r| r.contribution_amount).sum();
        let total_growth: f64 = self.records.iter().map(|r| r.growth_amount).sum();
        let total_withdrawals: f64 = self.records.iter().map(|r| r.withdrawal_amount).sum();

        let final_balance = self.final_balance();
        let (balance_at_retirement, first_year_withdrawal) = match self.retirement_record() {
            Some(r) => (r.opening_balance, r.withdrawal_amount),
            None => (final_balance, 0.0),
        };

        ProjectionSummary {
            total_years: self.records.len() as u32,
            balance_at_retirement,
            first_year_withdrawal,
            monthly_income: AnnuityIncome::from_annual(first_year_withdrawal).monthly,
            total_contributions,
            total_growth,
            total_withdrawals,
            final_balance,
            final_balance_real: real_value(
                final_balance,
                self.input.inflation_rate,
                self.records.len() as u32,
            ),
            depletion_age: self.depletion_age(),
        }
    }
}

/// First `year_index` at which `depleted` turns true, `None` if it never does
pub fn first_depleted_year(result: &ProjectionResult) -> Option<u32> {
    let mut previous = false;
    for record in result.records() {
        if record.depleted && !previous {
            return Some(record.year_index);
        }
        previous = record.depleted;
    }
    None
}

/// Summary statistics for a projection, as shown on a results panel or report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    /// Opening balance in the first retirement year
    pub balance_at_retirement: f64,
    pub first_year_withdrawal: f64,
    pub monthly_income: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub total_withdrawals: f64,
    pub final_balance: f64,
    /// Final balance in start-of-projection money
    pub final_balance_real: f64,
    pub depletion_age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year_index: u32, closing: f64, depleted: bool) -> YearRecord {
        let mut r = YearRecord::new(year_index, 60 + year_index);
        r.closing_balance = closing;
        r.depleted = depleted;
        r
    }

    fn result_with(records: Vec<YearRecord>) -> ProjectionResult {
        let input = ProjectionInput::new(60, 60, 60 + records.len() as u32 - 1, 100.0);
        ProjectionResult::new(input, records)
    }

    #[test]
    fn test_first_depleted_year_finds_transition() {
        let result = result_with(vec![
            record(0, 50.0, false),
            record(1, 10.0, false),
            record(2, 0.0, true),
            record(3, 0.0, true),
        ]);
        assert_eq!(first_depleted_year(&result), Some(2));
        assert_eq!(result.depletion_age(), Some(62));
        assert_eq!(result.final_balance(), 0.0);
    }

    #[test]
    fn test_first_depleted_year_none_when_funds_last() {
        let result = result_with(vec![record(0, 50.0, false), record(1, 40.0, false)]);
        assert_eq!(first_depleted_year(&result), None);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_depleted_in_first_year() {
        let result = result_with(vec![record(0, 0.0, true), record(1, 0.0, true)]);
        assert_eq!(first_depleted_year(&result), Some(0));
    }

    #[test]
    fn test_depletion_in_final_year_is_not_early() {
        let result = result_with(vec![record(0, 50.0, false), record(1, 0.0, true)]);
        assert_eq!(result.depletion_age(), Some(61));
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_balance_series_follows_records() {
        let result = result_with(vec![record(0, 50.0, false), record(1, 40.0, false)]);
        assert_eq!(result.balance_series(), vec![(60, 50.0), (61, 40.0)]);
    }
}
