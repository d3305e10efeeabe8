//! Projection input value objects

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// How retirement withdrawals are sized each year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WithdrawalStrategy {
    /// Same nominal amount in every retirement year
    FixedAmount { annual_amount: f64 },
    /// First retirement year takes `initial_amount`; later years escalate by inflation
    InflationLinked { initial_amount: f64 },
    /// Living annuity drawdown: a share of the post-growth balance
    PercentOfBalance { rate: f64 },
}

impl WithdrawalStrategy {
    /// Configured payload (amount or rate) and its field name
    fn payload(&self) -> (&'static str, f64) {
        match *self {
            WithdrawalStrategy::FixedAmount { annual_amount } => ("annual_amount", annual_amount),
            WithdrawalStrategy::InflationLinked { initial_amount } => {
                ("initial_amount", initial_amount)
            }
            WithdrawalStrategy::PercentOfBalance { rate } => ("rate", rate),
        }
    }

    /// Requested withdrawal for a retirement year.
    ///
    /// `available` is the post-growth, pre-withdrawal balance and
    /// `years_retired` is 0 in the first retirement year.
    pub fn requested_amount(&self, available: f64, years_retired: u32, inflation_rate: f64) -> f64 {
        match *self {
            WithdrawalStrategy::FixedAmount { annual_amount } => annual_amount,
            WithdrawalStrategy::InflationLinked { initial_amount } => {
                initial_amount * (1.0 + inflation_rate).powi(years_retired as i32)
            }
            WithdrawalStrategy::PercentOfBalance { rate } => available.max(0.0) * rate,
        }
    }
}

impl Default for WithdrawalStrategy {
    fn default() -> Self {
        WithdrawalStrategy::FixedAmount { annual_amount: 0.0 }
    }
}

/// Oldest age a projection may run to
pub const MAX_AGE: u32 = 150;

/// Scalar inputs for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub starting_balance: f64,

    /// Added at the end of each year before retirement
    #[serde(default)]
    pub annual_contribution: f64,

    /// Annual growth rate applied to the opening balance (0.05 = 5%)
    #[serde(default)]
    pub expected_return_rate: f64,

    #[serde(default)]
    pub withdrawal: WithdrawalStrategy,

    #[serde(default)]
    pub inflation_rate: f64,
}

impl ProjectionInput {
    /// Create an input with no contributions, growth, withdrawals or inflation
    pub fn new(current_age: u32, retirement_age: u32, life_expectancy: u32, starting_balance: f64) -> Self {
        Self {
            current_age,
            retirement_age,
            life_expectancy,
            starting_balance,
            annual_contribution: 0.0,
            expected_return_rate: 0.0,
            withdrawal: WithdrawalStrategy::default(),
            inflation_rate: 0.0,
        }
    }

    pub fn with_contribution(mut self, annual_contribution: f64) -> Self {
        self.annual_contribution = annual_contribution;
        self
    }

    pub fn with_return_rate(mut self, expected_return_rate: f64) -> Self {
        self.expected_return_rate = expected_return_rate;
        self
    }

    pub fn with_withdrawal(mut self, withdrawal: WithdrawalStrategy) -> Self {
        self.withdrawal = withdrawal;
        self
    }

    pub fn with_inflation(mut self, inflation_rate: f64) -> Self {
        self.inflation_rate = inflation_rate;
        self
    }

    /// Number of yearly records a projection of this input produces
    pub fn horizon_years(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.current_age).saturating_add(1)
    }

    /// Years of accumulation before the first retirement year
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Years with withdrawals, retirement age through life expectancy inclusive
    pub fn retirement_years(&self) -> u32 {
        self.life_expectancy.saturating_sub(self.retirement_age).saturating_add(1)
    }

    /// Check every constraint the engine relies on
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.retirement_age < self.current_age {
            return Err(InvalidInputError::RetirementBeforeCurrentAge {
                current_age: self.current_age,
                retirement_age: self.retirement_age,
            });
        }
        if self.life_expectancy < self.retirement_age {
            return Err(InvalidInputError::LifeExpectancyBeforeRetirement {
                retirement_age: self.retirement_age,
                life_expectancy: self.life_expectancy,
            });
        }

        if self.life_expectancy > MAX_AGE {
            return Err(InvalidInputError::AgeAboveMaximum {
                field: "life_expectancy",
                age: self.life_expectancy,
                max: MAX_AGE,
            });
        }

        let (withdrawal_field, withdrawal_value) = self.withdrawal.payload();
        let reals = [
            ("starting_balance", self.starting_balance),
            ("annual_contribution", self.annual_contribution),
            ("expected_return_rate", self.expected_return_rate),
            ("inflation_rate", self.inflation_rate),
            (withdrawal_field, withdrawal_value),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinite { field, value });
            }
        }

        if self.starting_balance < 0.0 {
            return Err(InvalidInputError::NegativeStartingBalance(self.starting_balance));
        }
        if self.annual_contribution < 0.0 {
            return Err(InvalidInputError::NegativeContribution(self.annual_contribution));
        }
        if withdrawal_value < 0.0 {
            return Err(InvalidInputError::NegativeWithdrawal {
                field: withdrawal_field,
                value: withdrawal_value,
            });
        }
        if self.expected_return_rate <= -1.0 {
            return Err(InvalidInputError::ReturnRateBelowTotalLoss(self.expected_return_rate));
        }
        if self.inflation_rate <= -1.0 {
            return Err(InvalidInputError::InflationRateBelowTotalLoss(self.inflation_rate));
        }

        Ok(())
    }
}

/// A named input, one row of a scenario comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub input: ProjectionInput,
}

impl Scenario {
    pub fn new(name: impl Into<String>, input: ProjectionInput) -> Self {
        Self { name: name.into(), input }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> ProjectionInput {
        ProjectionInput::new(40, 65, 90, 250_000.0)
            .with_contribution(12_000.0)
            .with_return_rate(0.07)
            .with_withdrawal(WithdrawalStrategy::InflationLinked { initial_amount: 60_000.0 })
            .with_inflation(0.03)
    }

    #[test]
    fn test_horizon_counts() {
        let input = base_input();
        assert_eq!(input.horizon_years(), 51);
        assert_eq!(input.years_to_retirement(), 25);
        assert_eq!(input.retirement_years(), 26);

        let single_year = ProjectionInput::new(70, 70, 70, 1.0);
        assert_eq!(single_year.horizon_years(), 1);
        assert_eq!(single_year.retirement_years(), 1);
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(base_input().validate().is_ok());
        assert!(ProjectionInput::new(0, 0, 0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_age_ordering_rejected() {
        let err = ProjectionInput::new(65, 60, 90, 1000.0).validate().unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::RetirementBeforeCurrentAge { current_age: 65, retirement_age: 60 }
        );

        let err = ProjectionInput::new(50, 65, 64, 1000.0).validate().unwrap_err();
        assert_eq!(err.field(), "life_expectancy");
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        let err = ProjectionInput::new(50, 65, 90, -1.0).validate().unwrap_err();
        assert_eq!(err, InvalidInputError::NegativeStartingBalance(-1.0));

        let err = base_input().with_return_rate(f64::NAN).validate().unwrap_err();
        assert_eq!(err.field(), "expected_return_rate");

        let err = base_input()
            .with_withdrawal(WithdrawalStrategy::PercentOfBalance { rate: f64::INFINITY })
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "rate");

        let err = base_input()
            .with_withdrawal(WithdrawalStrategy::FixedAmount { annual_amount: -5.0 })
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::NegativeWithdrawal { field: "annual_amount", value: -5.0 }
        );

        let err = base_input().with_return_rate(-1.0).validate().unwrap_err();
        assert_eq!(err, InvalidInputError::ReturnRateBelowTotalLoss(-1.0));

        let err = base_input().with_inflation(-1.0).validate().unwrap_err();
        assert_eq!(err, InvalidInputError::InflationRateBelowTotalLoss(-1.0));
        assert!(base_input().with_inflation(-0.02).validate().is_ok());

        let err = base_input().with_contribution(-100.0).validate().unwrap_err();
        assert_eq!(err.field(), "annual_contribution");
    }

    #[test]
    fn test_ages_beyond_maximum_rejected() {
        assert!(ProjectionInput::new(60, 65, MAX_AGE, 1_000.0).validate().is_ok());

        let err = ProjectionInput::new(60, 65, MAX_AGE + 1, 1_000.0).validate().unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::AgeAboveMaximum { field: "life_expectancy", age: 151, max: MAX_AGE }
        );

        let err = ProjectionInput::new(u32::MAX, u32::MAX, u32::MAX, 1_000.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "life_expectancy");

        let huge = ProjectionInput::new(0, 0, u32::MAX, 1_000.0);
        assert_eq!(huge.horizon_years(), u32::MAX);
        assert_eq!(huge.retirement_years(), u32::MAX);
    }

    #[test]
    fn test_requested_amount_by_strategy() {
        let fixed = WithdrawalStrategy::FixedAmount { annual_amount: 5_000.0 };
        assert_eq!(fixed.requested_amount(100_000.0, 3, 0.03), 5_000.0);

        let linked = WithdrawalStrategy::InflationLinked { initial_amount: 10_000.0 };
        assert_eq!(linked.requested_amount(100_000.0, 0, 0.03), 10_000.0);
        assert!((linked.requested_amount(100_000.0, 2, 0.03) - 10_609.0).abs() < 1e-9);

        let percent = WithdrawalStrategy::PercentOfBalance { rate: 0.05 };
        assert_eq!(percent.requested_amount(200_000.0, 7, 0.03), 10_000.0);
    }

    #[test]
    fn test_json_plan_defaults() {
        let json = r#"{
            "current_age": 60,
            "retirement_age": 65,
            "life_expectancy": 95,
            "starting_balance": 1500000.0,
            "expected_return_rate": 0.08,
            "withdrawal": { "mode": "percent_of_balance", "rate": 0.05 }
        }"#;
        let input: ProjectionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.annual_contribution, 0.0);
        assert_eq!(input.inflation_rate, 0.0);
        assert_eq!(input.withdrawal, WithdrawalStrategy::PercentOfBalance { rate: 0.05 });
    }
}
