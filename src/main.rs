//! Warranty goal seek CLI
//!
//! Solves for the warranty rate, prints run-out schedules, and runs CSV
//! batches. Solver settings come from GOALSEEK_* environment variables and
//! can be overridden per run with flags.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use warranty_goalseek::params::load_scenarios;
use warranty_goalseek::{goal_seek, runout, ParameterSet, RawParameters, ScenarioRunner, SolverConfig};

#[derive(Parser)]
#[command(name = "warranty_goalseek", version, about = "Engine maintenance warranty rate goal seek")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve for the rate that earns the target cumulative profit
    Solve {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        solver: SolverArgs,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print the yearly cash flows at a fixed rate
    Runout {
        #[command(flatten)]
        params: ParamArgs,
        /// Rate to run at (defaults to --initial-rate)
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Solve every scenario in a CSV file
    Batch {
        /// CSV with a header row of parameter names and an optional `scenario` column
        file: PathBuf,
        #[command(flatten)]
        solver: SolverArgs,
        #[arg(long)]
        json: bool,
    },
}

/// Scenario parameters; defaults are the ten-year reference case
#[derive(Args)]
struct ParamArgs {
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    num_years: i64,
    #[arg(long, default_value_t = 450.0, allow_negative_numbers = true)]
    au_hours: f64,
    #[arg(long = "initial-tsn", default_value_t = 100.0, allow_negative_numbers = true)]
    initial_tsn: f64,
    /// Annual escalation, percent
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    rate_escalation: f64,
    /// AIC surcharge, percent
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    aic: f64,
    #[arg(long = "hsi-tsn", default_value_t = 1000.0, allow_negative_numbers = true)]
    hsi_tsn: f64,
    #[arg(long = "overhaul-tsn", default_value_t = 3000.0, allow_negative_numbers = true)]
    overhaul_tsn: f64,
    #[arg(long, default_value_t = 50_000.0, allow_negative_numbers = true)]
    hsi_cost: f64,
    #[arg(long, default_value_t = 100_000.0, allow_negative_numbers = true)]
    overhaul_cost: f64,
    #[arg(long, default_value_t = 3_000_000.0, allow_negative_numbers = true)]
    target_profit: f64,
    #[arg(long, default_value_t = 320.0, allow_negative_numbers = true)]
    initial_rate: f64,
}

impl ParamArgs {
    fn validate(&self) -> Result<ParameterSet> {
        let raw = RawParameters {
            num_years: self.num_years,
            au_hours: self.au_hours,
            initial_tsn: self.initial_tsn,
            rate_escalation: self.rate_escalation,
            aic: self.aic,
            hsi_tsn: self.hsi_tsn,
            overhaul_tsn: self.overhaul_tsn,
            hsi_cost: self.hsi_cost,
            overhaul_cost: self.overhaul_cost,
            target_profit: self.target_profit,
            initial_rate: self.initial_rate,
        };
        ParameterSet::validate(&raw).context("invalid parameters")
    }
}

#[derive(Args)]
struct SolverArgs {
    /// Convergence tolerance on the profit residual
    #[arg(long)]
    tolerance: Option<f64>,
    #[arg(long)]
    max_iterations: Option<u32>,
}

impl SolverArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig::from_env().with_overrides(self.tolerance, self.max_iterations)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Solve { params, solver, json } => solve(&params, &solver, json),
        Command::Runout { params, rate, json } => print_runout(&params, rate, json),
        Command::Batch { file, solver, json } => batch(&file, &solver, json),
    }
}

fn solve(params: &ParamArgs, solver: &SolverArgs, json: bool) -> Result<()> {
    let params = params.validate()?;
    let result = goal_seek(&params, &solver.config()).context("goal seek failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Warranty Goal Seek");
    println!("==================\n");
    println!("  Years:            {}", params.num_years());
    println!("  Target Profit:    ${:.2}", params.target_profit());
    println!("  Initial Rate:     {:.6}", params.initial_rate());
    println!("  Baseline Profit:  ${:.2}", result.baseline_profit);
    println!();
    println!("  Optimal Rate:     {:.10}", result.optimal_warranty_rate);
    println!("  Final Profit:     ${:.2}", result.final_profit);
    println!("  Iterations:       {}", result.iterations);
    println!("  Time:             {:.3} ms", result.execution_time_ms);
    Ok(())
}

fn print_runout(params: &ParamArgs, rate: Option<f64>, json: bool) -> Result<()> {
    let params = params.validate()?;
    let rate = rate.unwrap_or(params.initial_rate());
    let schedule = runout(rate, &params).context("run-out failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!("Run-out at rate {:.6} ({} years):", rate, schedule.years.len());
    println!("{:>4} {:>10} {:>12} {:>14} {:>4} {:>4} {:>12} {:>14} {:>16}",
        "Year", "TSN", "Rate", "Revenue", "HSI", "OH", "Cost", "Profit", "Cumulative");
    println!("{}", "-".repeat(100));

    for row in &schedule.years {
        println!("{:>4} {:>10.1} {:>12.4} {:>14.2} {:>4} {:>4} {:>12.2} {:>14.2} {:>16.2}",
            row.year,
            row.tsn,
            row.escalated_rate,
            row.revenue,
            if row.hsi_event { "Y" } else { "" },
            if row.overhaul_event { "Y" } else { "" },
            row.cost,
            row.profit,
            row.cumulative_profit,
        );
    }

    let summary = schedule.summary();
    println!("\nSummary:");
    println!("  Total Revenue:     ${:.2}", summary.total_revenue);
    println!("  Total Cost:        ${:.2}", summary.total_cost);
    println!("  Cumulative Profit: ${:.2}", summary.cumulative_profit);
    match summary.hsi_year {
        Some(year) => println!("  HSI Year:          {}", year),
        None => println!("  HSI Year:          -"),
    }
    match summary.overhaul_year {
        Some(year) => println!("  Overhaul Year:     {}", year),
        None => println!("  Overhaul Year:     -"),
    }
    Ok(())
}

fn batch(file: &Path, solver: &SolverArgs, json: bool) -> Result<()> {
    let scenarios = load_scenarios(file)
        .with_context(|| format!("failed to load scenarios from {}", file.display()))?;

    let runner = ScenarioRunner::new(solver.config());
    let outcomes = runner.run_batch(&scenarios);

    if json {
        let rows: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(result) => serde_json::json!({ "scenario": o.name, "result": result }),
                Err(e) => serde_json::json!({ "scenario": o.name, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<24} {:>18} {:>6} {:>18}", "Scenario", "Optimal Rate", "Iter", "Final Profit");
    println!("{}", "-".repeat(70));
    for outcome in &outcomes {
        match &outcome.result {
            Ok(r) => println!("{:<24} {:>18.10} {:>6} {:>18.2}",
                outcome.name, r.optimal_warranty_rate, r.iterations, r.final_profit),
            Err(e) => println!("{:<24} error: {}", outcome.name, e),
        }
    }
    Ok(())
}
