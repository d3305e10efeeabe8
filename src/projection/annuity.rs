//! Closed-form annuity helpers
//!
//! All formulas use the engine's yearly timing: growth is earned on the
//! opening balance and contributions or withdrawals happen at year end.

use serde::{Deserialize, Serialize};

/// Rates closer than this are treated as equal
const RATE_EPSILON: f64 = 1e-12;

/// Balance after `years` of growth at `rate` with end-of-year contributions.
///
/// Matches the engine's opening balance in the first retirement year when
/// `years` is the number of accumulation years.
pub fn future_value(rate: f64, years: u32, annual_contribution: f64, present_value: f64) -> f64 {
    let n = years as f64;
    if rate.abs() < RATE_EPSILON {
        return present_value + annual_contribution * n;
    }

    let growth = (1.0 + rate).powi(years as i32);
    present_value * growth + annual_contribution * (growth - 1.0) / rate
}

/// First-year withdrawal that exhausts `balance` over exactly `years` years
/// when each later withdrawal grows by `escalation`.
///
/// With `escalation == 0` this is a level payment annuity.
pub fn sustainable_withdrawal(balance: f64, rate: f64, escalation: f64, years: u32) -> f64 {
    if years == 0 || balance <= 0.0 {
        return 0.0;
    }

    let n = years as f64;
    if (rate - escalation).abs() < RATE_EPSILON {
        // Every discounted payment is worth W / (1 + r)
        return balance * (1.0 + rate) / n;
    }

    let ratio = (1.0 + escalation) / (1.0 + rate);
    balance * (rate - escalation) / (1.0 - ratio.powi(years as i32))
}

/// Income from a living annuity at a given drawdown rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityIncome {
    pub annual: f64,
    pub monthly: f64,
}

impl AnnuityIncome {
    /// Split an annual income into twelve equal monthly payments
    pub fn from_annual(annual: f64) -> Self {
        Self {
            annual,
            monthly: annual / 12.0,
        }
    }
}

pub fn living_annuity_income(balance: f64, drawdown_rate: f64) -> AnnuityIncome {
    AnnuityIncome::from_annual(balance.max(0.0) * drawdown_rate)
}

/// Deflate a nominal amount `years` into the future back to today's money
pub fn real_value(nominal: f64, inflation_rate: f64, years: u32) -> f64 {
    nominal / (1.0 + inflation_rate).powi(years as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_future_value_zero_rate() {
        assert_eq!(future_value(0.0, 10, 1_000.0, 5_000.0), 15_000.0);
        assert_eq!(future_value(0.07, 0, 1_000.0, 5_000.0), 5_000.0);
    }

    #[test]
    fn test_future_value_compound() {
        // 10k for 2 years at 10% plus 1k at the end of each year
        // 10k * 1.21 + 1k * 1.1 + 1k
        assert_relative_eq!(future_value(0.10, 2, 1_000.0, 10_000.0), 14_200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_level_withdrawal_matches_annuity_payment() {
        // 100k over 10 years at 5%: standard annuity payment
        let w = sustainable_withdrawal(100_000.0, 0.05, 0.0, 10);
        assert_relative_eq!(w, 12_950.4575, epsilon = 1e-3);
    }

    #[test]
    fn test_withdrawal_without_growth_splits_evenly() {
        let w = sustainable_withdrawal(90_000.0, 0.0, 0.0, 3);
        assert_relative_eq!(w, 30_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_withdrawal_when_escalation_equals_rate() {
        // Each year: balance grows by r, then W(1+r)^k is taken
        let w = sustainable_withdrawal(100_000.0, 0.04, 0.04, 4);
        assert_relative_eq!(w, 26_000.0, epsilon = 1e-9);

        let mut balance = 100_000.0_f64;
        for k in 0..4 {
            balance = balance * 1.04 - w * 1.04_f64.powi(k);
        }
        assert!(balance.abs() < 1e-6);
    }

    #[test]
    fn test_escalating_withdrawal_exhausts_balance() {
        let w = sustainable_withdrawal(1_000_000.0, 0.08, 0.03, 30);
        let mut balance = 1_000_000.0_f64;
        for k in 0..30 {
            balance = balance * 1.08 - w * 1.03_f64.powi(k);
        }
        assert!(balance.abs() < 1e-4, "residual balance {balance}");
    }

    #[test]
    fn test_degenerate_withdrawal_inputs() {
        assert_eq!(sustainable_withdrawal(100_000.0, 0.05, 0.0, 0), 0.0);
        assert_eq!(sustainable_withdrawal(0.0, 0.05, 0.0, 10), 0.0);
    }

    #[test]
    fn test_living_annuity_income() {
        let income = living_annuity_income(3_000_000.0, 0.05);
        assert_relative_eq!(income.annual, 150_000.0, epsilon = 1e-9);
        assert_relative_eq!(income.monthly, 12_500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_real_value() {
        assert_relative_eq!(real_value(110.25, 0.05, 2), 100.0, epsilon = 1e-9);
        assert_eq!(real_value(100.0, 0.0, 30), 100.0);
    }
}
