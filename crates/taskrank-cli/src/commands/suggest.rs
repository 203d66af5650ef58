//! Top-N suggestions from the stored task set.

use chrono::NaiveDate;
use clap::Args;
use taskrank_core::analysis;
use taskrank_core::{Config, Strategy, TaskStore};

#[derive(Args)]
pub struct SuggestArgs {
    /// Strategy (defaults to scoring.default_strategy)
    #[arg(long)]
    pub strategy: Option<String>,
    /// Number of tasks to suggest (defaults to suggest.limit)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Evaluate deadlines as of this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
    /// Print suggestions as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SuggestArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open()?;
    let tasks = store.list_tasks()?;

    let strategy = match args.strategy.as_deref() {
        Some(name) => Strategy::resolve(name),
        None => config.strategy(),
    };
    let limit = args.limit.unwrap_or(config.suggest.limit);

    let engine = super::engine_for(args.today);
    let suggestions = analysis::suggest(&engine, &tasks, strategy, limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("No task suggestions available.");
        println!("  Import tasks first with `taskrank store import <file>`.");
        return Ok(());
    }

    println!("=== Task Suggestions ({strategy}) ===\n");
    super::print_ranked(&suggestions);
    Ok(())
}
