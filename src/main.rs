//! Retirement Planner CLI
//!
//! Projects a single retirement plan and prints the yearly table, JSON or CSV

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::{Parser, ValueEnum};
use retirement_planner::{
    project,
    projection::{future_value, living_annuity_income, sustainable_withdrawal},
    ComputationWarning, ProjectionInput, ProjectionResult, ProjectionSummary, WithdrawalStrategy,
    YearRecord,
};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum WithdrawalMode {
    /// Same amount every year
    Fixed,
    /// First-year amount escalated by inflation
    InflationLinked,
    /// Living annuity: a percentage of the balance
    Percent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "retirement_planner", version, about = "Project retirement savings year by year")]
struct Cli {
    /// JSON plan file; replaces the individual input flags
    #[arg(long)]
    plan: Option<PathBuf>,

    #[arg(long, env = "CURRENT_AGE", default_value_t = 45)]
    current_age: u32,

    #[arg(long, env = "RETIREMENT_AGE", default_value_t = 65)]
    retirement_age: u32,

    #[arg(long, env = "LIFE_EXPECTANCY", default_value_t = 90)]
    life_expectancy: u32,

    #[arg(long, env = "STARTING_BALANCE", default_value_t = 500_000.0)]
    starting_balance: f64,

    #[arg(long, env = "ANNUAL_CONTRIBUTION", default_value_t = 0.0)]
    annual_contribution: f64,

    /// Annual return as a decimal (0.08 = 8%)
    #[arg(long, env = "EXPECTED_RETURN", default_value_t = 0.08, allow_negative_numbers = true)]
    expected_return: f64,

    #[arg(long, env = "WITHDRAWAL_MODE", value_enum, default_value_t = WithdrawalMode::InflationLinked)]
    withdrawal_mode: WithdrawalMode,

    /// Annual amount, or drawdown rate for `percent`.
    /// Amount modes default to the withdrawal that lasts exactly to life expectancy.
    #[arg(long, env = "WITHDRAWAL")]
    withdrawal: Option<f64>,

    #[arg(long, env = "INFLATION_RATE", default_value_t = 0.03, allow_negative_numbers = true)]
    inflation_rate: f64,

    /// Calendar year of the first projection row (defaults to this year)
    #[arg(long)]
    start_year: Option<i32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Cli {
    fn to_input(&self) -> Result<ProjectionInput> {
        if let Some(path) = &self.plan {
            let file = File::open(path)
                .with_context(|| format!("failed to open plan file {}", path.display()))?;
            let input: ProjectionInput = serde_json::from_reader(file)
                .with_context(|| format!("failed to parse plan file {}", path.display()))?;
            return Ok(input);
        }

        let input = ProjectionInput::new(
            self.current_age,
            self.retirement_age,
            self.life_expectancy,
            self.starting_balance,
        )
        .with_contribution(self.annual_contribution)
        .with_return_rate(self.expected_return)
        .with_inflation(self.inflation_rate);

        let withdrawal = match (self.withdrawal_mode, self.withdrawal) {
            (WithdrawalMode::Fixed, Some(amount)) => {
                WithdrawalStrategy::FixedAmount { annual_amount: amount }
            }
            (WithdrawalMode::InflationLinked, Some(amount)) => {
                WithdrawalStrategy::InflationLinked { initial_amount: amount }
            }
            (WithdrawalMode::Percent, Some(rate)) => WithdrawalStrategy::PercentOfBalance { rate },
            (WithdrawalMode::Percent, None) => bail!("--withdrawal is required for percent mode"),
            (mode, None) => {
                let at_retirement = future_value(
                    input.expected_return_rate,
                    input.years_to_retirement(),
                    input.annual_contribution,
                    input.starting_balance,
                );
                if mode == WithdrawalMode::Fixed {
                    let amount = sustainable_withdrawal(
                        at_retirement,
                        input.expected_return_rate,
                        0.0,
                        input.retirement_years(),
                    );
                    WithdrawalStrategy::FixedAmount { annual_amount: amount }
                } else {
                    let amount = sustainable_withdrawal(
                        at_retirement,
                        input.expected_return_rate,
                        input.inflation_rate,
                        input.retirement_years(),
                    );
                    WithdrawalStrategy::InflationLinked { initial_amount: amount }
                }
            }
        };

        Ok(input.with_withdrawal(withdrawal))
    }
}

/// JSON envelope for a single projection
#[derive(Serialize)]
struct ProjectionResponse<'a> {
    generated_at: String,
    start_year: i32,
    input: &'a ProjectionInput,
    summary: ProjectionSummary,
    warnings: Vec<ComputationWarning>,
    records: &'a [YearRecord],
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let input = cli.to_input()?;
    let start_year = cli.start_year.unwrap_or_else(|| Local::now().year());
    log::info!("projecting plan {:?}", input);

    let result = project(&input).context("invalid projection input")?;

    match cli.format {
        OutputFormat::Table => print_table(&result, start_year),
        OutputFormat::Json => {
            let response = ProjectionResponse {
                generated_at: Utc::now().to_rfc3339(),
                start_year,
                input: result.input(),
                summary: result.summary(),
                warnings: result.warnings(),
                records: result.records(),
            };
            serde_json::to_writer_pretty(io::stdout().lock(), &response)?;
            println!();
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout().lock());
            for record in result.records() {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn print_table(result: &ProjectionResult, start_year: i32) {
    println!("Retirement Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");

    println!("{:>5} {:>4} {:>16} {:>14} {:>14} {:>14} {:>16} {:>8}",
        "Year", "Age", "Opening", "Growth", "Contribution", "Withdrawal", "Closing", "Depleted");
    println!("{}", "-".repeat(100));

    for row in result.records() {
        println!("{:>5} {:>4} {:>16.2} {:>14.2} {:>14.2} {:>14.2} {:>16.2} {:>8}",
            start_year + row.year_index as i32,
            row.age,
            row.opening_balance,
            row.growth_amount,
            row.contribution_amount,
            row.withdrawal_amount,
            row.closing_balance,
            if row.depleted { "yes" } else { "" },
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  At retirement value:   {:.2}", summary.balance_at_retirement);
    println!("  First-year withdrawal: {:.2}", summary.first_year_withdrawal);
    println!("  Monthly income:        {:.2}", summary.monthly_income);
    if let WithdrawalStrategy::PercentOfBalance { rate } = result.input().withdrawal {
        let income = living_annuity_income(summary.final_balance, rate);
        println!("  Next-year drawdown:    {:.2} ({:.2} a month)", income.annual, income.monthly);
    }
    println!("  Total contributions:   {:.2}", summary.total_contributions);
    println!("  Total growth:          {:.2}", summary.total_growth);
    println!("  Total withdrawals:     {:.2}", summary.total_withdrawals);
    println!("  Final balance:         {:.2} ({:.2} in today's money)",
        summary.final_balance, summary.final_balance_real);

    match summary.depletion_age {
        Some(age) => println!("  Funds last until age {}", age),
        None => println!("  Funds never run out"),
    }

    for warning in result.warnings() {
        println!("  Warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rates_parse() {
        let cli = Cli::try_parse_from([
            "retirement_planner",
            "--expected-return",
            "-0.02",
            "--inflation-rate",
            "-0.01",
            "--withdrawal-mode",
            "fixed",
            "--withdrawal",
            "10000",
        ])
        .unwrap();
        assert_eq!(cli.inflation_rate, -0.01);
        assert_eq!(cli.expected_return, -0.02);

        let input = cli.to_input().unwrap();
        assert_eq!(input.inflation_rate, -0.01);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_percent_mode_requires_rate() {
        let cli = Cli::try_parse_from(["retirement_planner", "--withdrawal-mode", "percent"]).unwrap();
        assert!(cli.to_input().is_err());

        let cli = Cli::try_parse_from([
            "retirement_planner",
            "--withdrawal-mode",
            "percent",
            "--withdrawal",
            "0.05",
        ])
        .unwrap();
        assert_eq!(
            cli.to_input().unwrap().withdrawal,
            WithdrawalStrategy::PercentOfBalance { rate: 0.05 }
        );
    }
}
