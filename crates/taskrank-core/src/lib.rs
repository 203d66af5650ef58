//! # taskrank Core Library
//!
//! Ranks tasks by a composite priority score built from deadline urgency,
//! importance, estimated effort and dependency relationships, and explains
//! which factor dominated. The `taskrank` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Scoring**: per-factor normalization, strategy weighting, dependency
//!   cycle penalty and explanation selection. Pure and synchronous.
//! - **Analysis**: batch decoding, ranking and top-N suggestions
//! - **Storage**: SQLite task store (replace-all semantics) and TOML configuration
//!
//! ## Key Components
//!
//! - [`ScoringEngine`]: scores one task against its batch
//! - [`TaskRecord`]: a submitted task
//! - [`TaskStore`]: persisted task set
//! - [`Config`]: application configuration management

pub mod analysis;
pub mod error;
pub mod scoring;
pub mod storage;
pub mod task;

pub use analysis::{AnalysisReport, AnalyzedTask, BatchRequest, PriorityBand};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use scoring::{score, DependencyGraph, Factor, ScoreResult, ScoringEngine, Strategy, StrategyWeights};
pub use storage::{Config, TaskStore};
pub use task::{TaskId, TaskRecord};
