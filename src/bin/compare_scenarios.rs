//! Compare retirement scenarios from a CSV file
//!
//! Usage: cargo run --bin compare_scenarios -- scenarios.csv [--json]
//!
//! Expected columns: Name,CurrentAge,RetirementAge,LifeExpectancy,StartingBalance,
//! AnnualContribution,ExpectedReturn,WithdrawalMode,Withdrawal,InflationRate

use anyhow::{Context, Result};
use clap::Parser;
use retirement_planner::plan::load_scenarios;
use retirement_planner::scenario::ScenarioReport;
use retirement_planner::run_scenarios;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "compare_scenarios", about = "Project several retirement scenarios side by side")]
struct Args {
    /// Scenario CSV file
    path: PathBuf,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ComparisonResponse {
    scenario_count: usize,
    execution_time_ms: u64,
    scenarios: Vec<ScenarioReport>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let scenarios = load_scenarios(&args.path)
        .with_context(|| format!("failed to load scenarios from {}", args.path.display()))?;
    log::info!("loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let outcomes = run_scenarios(&scenarios);
    let reports: Vec<ScenarioReport> = outcomes.iter().map(|o| o.to_report()).collect();
    let elapsed = start.elapsed();

    if args.json {
        let response = ComparisonResponse {
            scenario_count: reports.len(),
            execution_time_ms: elapsed.as_millis() as u64,
            scenarios: reports,
        };
        serde_json::to_writer_pretty(io::stdout().lock(), &response)?;
        println!();
        return Ok(());
    }

    println!("{:<24} {:>16} {:>14} {:>16} {:>12}",
        "Scenario", "At Retirement", "First W/D", "Final Balance", "Depletes At");
    println!("{}", "-".repeat(86));

    for report in &reports {
        match (&report.summary, &report.error) {
            (Some(summary), _) => {
                let depletes = summary
                    .depletion_age
                    .map(|age| age.to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!("{:<24} {:>16.2} {:>14.2} {:>16.2} {:>12}",
                    report.name,
                    summary.balance_at_retirement,
                    summary.first_year_withdrawal,
                    summary.final_balance,
                    depletes,
                );
            }
            (None, Some(error)) => println!("{:<24} error: {}", report.name, error),
            (None, None) => println!("{:<24} no result", report.name),
        }
    }

    println!("\n{} scenarios in {:?}", reports.len(), elapsed);
    Ok(())
}
