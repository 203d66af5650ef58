//! Batch analysis command.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use taskrank_core::analysis::{self, parse_batch};
use taskrank_core::Config;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file with a task list or {"tasks": [...]} object (stdin if omitted or "-")
    pub file: Option<PathBuf>,
    /// Strategy: smart_balance, fastest_wins, deadline_driven or high_impact
    #[arg(long)]
    pub strategy: Option<String>,
    /// Evaluate deadlines as of this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let input = super::read_input(args.file.as_deref())?;
    let batch = parse_batch(&input)?;

    // --strategy, then the payload's own strategy, then the configured default.
    let strategy_name = args
        .strategy
        .or(batch.strategy)
        .unwrap_or_else(|| config.scoring.default_strategy.clone());
    tracing::info!(strategy = %strategy_name, tasks = batch.tasks.len(), "analyzing tasks");

    let engine = super::engine_for(args.today);
    let report = analysis::report(&engine, &batch.tasks, &strategy_name);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.tasks.is_empty() {
        println!("No tasks to analyze.");
        return Ok(());
    }

    println!("=== Ranked Tasks ({}) ===\n", report.strategy);
    super::print_ranked(&report.tasks);
    Ok(())
}
