//! Task priority scoring.
//!
//! A task's score combines four normalized factors:
//! - Deadline urgency (overdue work keeps climbing, far-off work contributes nothing)
//! - User-defined importance
//! - Effort, rewarding quick wins
//! - Dependencies, rewarding tasks that block others
//!
//! The factors are weighted by a named [`Strategy`]. A task that reaches a
//! dependency cycle has its weighted score halved, and the explanation says
//! so instead of naming the dominant factor.

pub mod explain;
pub mod factors;
pub mod graph;
pub mod strategy;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::TaskRecord;

pub use explain::{Contributions, Factor};
pub use factors::{FactorScores, Urgency};
pub use graph::DependencyGraph;
pub use strategy::{Strategy, StrategyWeights};

/// Multiplier applied to the weighted score of a task on a cycle.
pub const CYCLE_PENALTY: f64 = 0.5;

/// Outcome of scoring one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub explanation: String,
    pub factors: FactorScores,
    pub in_cycle: bool,
}

/// Scores tasks relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    today: NaiveDate,
}

impl ScoringEngine {
    /// Engine evaluating deadlines against the local calendar date.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Engine evaluating deadlines against `today`.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Score `task` against the batch it belongs to.
    ///
    /// Unknown strategy names fall back to `smart_balance`. Builds a
    /// [`DependencyGraph`] for the batch; when scoring many tasks from the
    /// same batch, build it once and call [`ScoringEngine::score_in`].
    pub fn score(&self, task: &TaskRecord, all_tasks: &[TaskRecord], strategy: &str) -> ScoreResult {
        let graph = DependencyGraph::build(all_tasks);
        self.score_in(task, &graph, Strategy::resolve(strategy))
    }

    /// Score `task` against a pre-built batch graph.
    pub fn score_in(
        &self,
        task: &TaskRecord,
        graph: &DependencyGraph<'_>,
        strategy: Strategy,
    ) -> ScoreResult {
        let weights = strategy.weights();

        let urgency = factors::urgency(task.due_date, self.today);
        let importance = task.importance_level();
        let estimated_hours = task.effort_hours();

        let (blocks_others, in_cycle) = match &task.id {
            Some(id) => (graph.blocks_others(id), graph.in_cycle(id)),
            None => (false, false),
        };

        let factors = FactorScores {
            urgency: urgency.score,
            importance: factors::importance(importance),
            effort: factors::effort(estimated_hours),
            dependency: if blocks_others { 1.0 } else { 0.0 },
        };

        let contributions = Contributions::weigh(&factors, &weights);
        let mut score = contributions.total();
        if in_cycle {
            tracing::debug!(task_id = ?task.id, title = %task.title, "dependency cycle detected");
            score *= CYCLE_PENALTY;
        }

        let explanation = explain::explain(&explain::ExplanationInput {
            contributions,
            urgency,
            importance,
            estimated_hours,
            in_cycle,
        });

        ScoreResult {
            score,
            explanation,
            factors,
            in_cycle,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function scoring one task against today's date.
pub fn score(task: &TaskRecord, all_tasks: &[TaskRecord], strategy: &str) -> ScoreResult {
    ScoringEngine::new().score(task, all_tasks, strategy)
}
