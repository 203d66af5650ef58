mod config;
pub mod migrations;
pub mod task_store;

pub use config::{Config, LogConfig, ScoringConfig, SuggestConfig};
pub use task_store::TaskStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the taskrank data directory, creating it if needed.
///
/// Resolution order:
/// - `TASKRANK_DATA_DIR`, used as-is
/// - `~/.config/taskrank-dev/` when `TASKRANK_ENV=dev`
/// - `~/.config/taskrank/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TASKRANK_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKRANK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskrank-dev")
            } else {
                base_dir.join("taskrank")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
