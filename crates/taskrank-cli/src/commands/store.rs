//! Stored task set commands.

use std::path::PathBuf;

use clap::Subcommand;
use taskrank_core::analysis::parse_batch;
use taskrank_core::TaskStore;

#[derive(Subcommand)]
pub enum StoreAction {
    /// Replace the stored task set with a batch (stdin if FILE is omitted or "-")
    Import {
        /// JSON file with a task list or {"tasks": [...]} object
        file: Option<PathBuf>,
    },
    /// List stored tasks as JSON
    List,
    /// Delete every stored task
    Clear,
}

pub fn run(action: StoreAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open()?;

    match action {
        StoreAction::Import { file } => {
            let input = super::read_input(file.as_deref())?;
            let batch = parse_batch(&input)?;
            let stored = store.replace_all(&batch.tasks)?;
            println!("Stored {} tasks", stored.len());
        }
        StoreAction::List => {
            let tasks = store.list_tasks()?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        StoreAction::Clear => {
            let deleted = store.clear()?;
            println!("Deleted {deleted} tasks");
        }
    }
    Ok(())
}
