//! Batch ranking.
//!
//! Decodes submitted batches, scores every task against the shared batch
//! graph and orders the result by score, highest first.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::scoring::{DependencyGraph, ScoringEngine, Strategy};
use crate::task::TaskRecord;

/// Number of tasks returned by [`suggest`] unless configured otherwise.
pub const DEFAULT_SUGGEST_LIMIT: usize = 3;

/// A submitted task annotated with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTask {
    #[serde(flatten)]
    pub task: TaskRecord,
    pub score: f64,
    pub explanation: String,
}

impl AnalyzedTask {
    /// Annotate `task` with its score.
    ///
    /// Submitted `score` or `explanation` fields are replaced.
    pub fn new(mut task: TaskRecord, score: f64, explanation: String) -> Self {
        task.extra.remove("score");
        task.extra.remove("explanation");
        Self {
            task,
            score,
            explanation,
        }
    }

    pub fn band(&self) -> PriorityBand {
        PriorityBand::from_score(self.score)
    }
}

/// Ranked output of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub strategy: Strategy,
    pub tasks: Vec<AnalyzedTask>,
}

/// Coarse bucket for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    /// High from 1.5, medium from 0.8.
    pub fn from_score(score: f64) -> Self {
        if score >= 1.5 {
            PriorityBand::High
        } else if score >= 0.8 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }
}

/// A decoded batch request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub tasks: Vec<TaskRecord>,
    /// Strategy named inside the payload, if any.
    pub strategy: Option<String>,
}

/// Decode a batch payload.
///
/// Accepts a bare JSON array of task records, or an object whose `tasks`
/// member is one (optionally with a `strategy` name). An object without
/// `tasks` is an empty batch.
pub fn parse_batch(json: &str) -> Result<BatchRequest> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let (tasks, strategy) = match value {
        serde_json::Value::Array(_) => (value, None),
        serde_json::Value::Object(mut obj) => {
            let strategy = obj
                .remove("strategy")
                .and_then(|s| s.as_str().map(str::to_string));
            let tasks = obj
                .remove("tasks")
                .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));
            (tasks, strategy)
        }
        _ => return Err(not_a_list()),
    };

    if !tasks.is_array() {
        return Err(not_a_list());
    }
    let tasks: Vec<TaskRecord> = serde_json::from_value(tasks)?;
    Ok(BatchRequest { tasks, strategy })
}

fn not_a_list() -> crate::error::CoreError {
    ValidationError::InvalidBatch("Tasks must be a list".into()).into()
}

/// Score every task in `tasks` and sort descending.
///
/// Equal scores keep their submission order.
pub fn analyze(engine: &ScoringEngine, tasks: &[TaskRecord], strategy: Strategy) -> Vec<AnalyzedTask> {
    let graph = DependencyGraph::build(tasks);
    tracing::debug!(
        tasks = tasks.len(),
        indexed = graph.len(),
        strategy = %strategy,
        "analyzing batch"
    );

    let score_one = |task: &TaskRecord| {
        let result = engine.score_in(task, &graph, strategy);
        AnalyzedTask::new(task.clone(), result.score, result.explanation)
    };

    #[cfg(feature = "parallel")]
    let mut analyzed: Vec<AnalyzedTask> = {
        use rayon::prelude::*;
        tasks.par_iter().map(score_one).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let mut analyzed: Vec<AnalyzedTask> = tasks.iter().map(score_one).collect();

    analyzed.sort_by(|a, b| b.score.total_cmp(&a.score));
    analyzed
}

/// Analyze a batch and wrap it with the strategy that was applied.
pub fn report(engine: &ScoringEngine, tasks: &[TaskRecord], strategy_name: &str) -> AnalysisReport {
    let strategy = Strategy::resolve(strategy_name);
    AnalysisReport {
        strategy,
        tasks: analyze(engine, tasks, strategy),
    }
}

/// The `limit` highest-scoring tasks.
pub fn suggest(
    engine: &ScoringEngine,
    tasks: &[TaskRecord],
    strategy: Strategy,
    limit: usize,
) -> Vec<AnalyzedTask> {
    let mut ranked = analyze(engine, tasks, strategy);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::task::TaskId;
    use chrono::{Duration, NaiveDate};

    fn engine() -> ScoringEngine {
        ScoringEngine::with_today(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
    }

    #[test]
    fn parse_bare_array() {
        let batch = parse_batch(r#"[{"id": 1, "title": "a"}, {"title": "b"}]"#).unwrap();
        assert_eq!(batch.tasks.len(), 2);
        assert_eq!(batch.strategy, None);
    }

    #[test]
    fn parse_request_object() {
        let batch = parse_batch(
            r#"{"tasks": [{"id": 1, "title": "a"}], "strategy": "high_impact"}"#,
        )
        .unwrap();
        assert_eq!(batch.tasks.len(), 1);
        assert_eq!(batch.strategy.as_deref(), Some("high_impact"));
    }

    #[test]
    fn object_without_tasks_is_empty_batch() {
        let batch = parse_batch(r#"{"strategy": "fastest_wins"}"#).unwrap();
        assert!(batch.tasks.is_empty());
    }

    #[test]
    fn non_list_tasks_is_rejected() {
        let err = parse_batch(r#"{"tasks": {"id": 1}}"#).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidBatch(_))
        ));
        assert!(parse_batch("42").is_err());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = parse_batch("[{").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn analyze_sorts_descending() {
        let today = engine().today();
        let tasks = vec![
            TaskRecord::new("later").with_id(1).with_due_date(today + Duration::days(30)),
            TaskRecord::new("overdue").with_id(2).with_due_date(today - Duration::days(3)),
            TaskRecord::new("soon").with_id(3).with_due_date(today + Duration::days(1)),
        ];

        let ranked = analyze(&engine(), &tasks, Strategy::SmartBalance);
        let titles: Vec<&str> = ranked.iter().map(|t| t.task.title.as_str()).collect();
        assert_eq!(titles, ["overdue", "soon", "later"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn equal_scores_keep_submission_order() {
        let tasks = vec![
            TaskRecord::new("first").with_id(1),
            TaskRecord::new("second").with_id(2),
            TaskRecord::new("third").with_id(3),
        ];
        let ranked = analyze(&engine(), &tasks, Strategy::SmartBalance);
        let ids: Vec<_> = ranked.iter().map(|t| t.task.id.clone()).collect();
        assert_eq!(ids, [Some(TaskId::Int(1)), Some(TaskId::Int(2)), Some(TaskId::Int(3))]);
    }

    #[test]
    fn suggest_truncates() {
        let tasks: Vec<TaskRecord> = (1..=5)
            .map(|i| TaskRecord::new(format!("t{i}")).with_id(i).with_importance(i))
            .collect();
        let top = suggest(&engine(), &tasks, Strategy::HighImpact, DEFAULT_SUGGEST_LIMIT);
        let ids: Vec<_> = top.iter().map(|t| t.task.id.clone()).collect();
        assert_eq!(ids, [Some(TaskId::Int(5)), Some(TaskId::Int(4)), Some(TaskId::Int(3))]);
    }

    #[test]
    fn report_resolves_unknown_strategy() {
        let report = report(&engine(), &[], "bogus");
        assert_eq!(report.strategy, Strategy::SmartBalance);
        assert!(report.tasks.is_empty());
    }

    #[test]
    fn analyzed_task_serializes_flat() {
        let tasks = vec![TaskRecord::new("solo").with_id(9)];
        let ranked = analyze(&engine(), &tasks, Strategy::SmartBalance);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["title"], "solo");
        assert!(json["score"].is_f64());
        assert!(json["explanation"].is_string());
    }

    #[test]
    fn submitted_score_fields_are_replaced() {
        let batch = parse_batch(
            r#"[{"id": 1, "title": "t", "score": 99, "explanation": "mine", "tag": "x"}]"#,
        )
        .unwrap();
        let ranked = analyze(&engine(), &batch.tasks, Strategy::SmartBalance);
        let json = serde_json::to_string(&ranked[0]).unwrap();

        assert_eq!(json.matches("\"score\"").count(), 1);
        assert_eq!(json.matches("\"explanation\"").count(), 1);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_ne!(value["score"], 99);
        assert_ne!(value["explanation"], "mine");
        assert_eq!(value["tag"], "x");
    }

    #[test]
    fn string_id_batch_is_scored() {
        let batch = parse_batch(
            r#"[{"id": "a", "title": "x", "dependencies": ["b"]},
                {"id": "b", "title": "y", "dependencies": ["a"]},
                {"id": "c", "title": "z", "dependencies": ["b"]}]"#,
        )
        .unwrap();
        let ranked = analyze(&engine(), &batch.tasks, Strategy::SmartBalance);
        assert_eq!(ranked.len(), 3);

        let by_title = |title: &str| ranked.iter().find(|t| t.task.title == title).unwrap();
        assert!(by_title("x").explanation.contains("Circular Dependency"));
        assert!(by_title("y").explanation.contains("Circular Dependency"));
        assert!(by_title("z").explanation.contains("Circular Dependency"));
        // "a" and "b" are both depended on; "c" is not. Importance 5, 1 hour:
        // 0.5 * 0.35 + 0.1 + 0.1, halved.
        assert!((by_title("x").score - 0.1875).abs() < 1e-12);
    }

    #[test]
    fn string_id_dependency_bonus() {
        let batch = parse_batch(
            r#"[{"id": "lead", "title": "lead"}, {"id": "follow", "title": "follow", "dependencies": ["lead"]}]"#,
        )
        .unwrap();
        let ranked = analyze(&engine(), &batch.tasks, Strategy::SmartBalance);
        assert_eq!(ranked[0].task.title, "lead");
        assert!((ranked[0].score - ranked[1].score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn bands() {
        assert_eq!(PriorityBand::from_score(1.5), PriorityBand::High);
        assert_eq!(PriorityBand::from_score(0.8), PriorityBand::Medium);
        assert_eq!(PriorityBand::from_score(0.79), PriorityBand::Low);
    }
}
