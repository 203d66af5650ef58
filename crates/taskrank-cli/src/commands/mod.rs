pub mod analyze;
pub mod config;
pub mod store;
pub mod strategy;
pub mod suggest;

use std::io::Read;
use std::path::Path;

use chrono::{Local, NaiveDate};
use taskrank_core::analysis::{AnalyzedTask, PriorityBand};
use taskrank_core::ScoringEngine;

/// Read a batch payload from a file, or stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(p) if p != Path::new("-") => Ok(std::fs::read_to_string(p)
            .map_err(|e| format!("cannot read {}: {e}", p.display()))?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Engine for `--today`, or the local date.
pub fn engine_for(today: Option<NaiveDate>) -> ScoringEngine {
    ScoringEngine::with_today(today.unwrap_or_else(|| Local::now().date_naive()))
}

/// Print ranked tasks as a human-readable list.
pub fn print_ranked(tasks: &[AnalyzedTask]) {
    for (i, analyzed) in tasks.iter().enumerate() {
        let task = &analyzed.task;
        let marker = match analyzed.band() {
            PriorityBand::High => "!!",
            PriorityBand::Medium => "! ",
            PriorityBand::Low => "  ",
        };
        let id = task.id.as_ref().map(|id| format!("#{id}")).unwrap_or_else(|| "-".into());
        println!(
            "{marker}{:>2}. {} {} (Score: {:.2}, {})",
            i + 1,
            id,
            task.title,
            analyzed.score,
            analyzed.band().label()
        );
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "No Date".into());
        println!("     Due: {due}");
        println!("     Reason: {}", analyzed.explanation);
    }
}
