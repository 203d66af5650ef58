//! Integration tests for the scoring engine.
//!
//! These tests exercise the public scoring API end to end: normalization,
//! strategy weighting, cycle penalties and explanations.

use chrono::{Duration, NaiveDate};
use taskrank_core::{ScoringEngine, Strategy, TaskRecord};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn engine() -> ScoringEngine {
    ScoringEngine::with_today(today())
}

fn dated(id: i64, days_from_today: i64) -> TaskRecord {
    TaskRecord::new(format!("task {id}"))
        .with_id(id)
        .with_due_date(today() + Duration::days(days_from_today))
        .with_importance(5)
        .with_estimated_hours(4)
}

#[test]
fn test_overdue_priority() {
    let overdue = dated(1, -1);
    let future = dated(2, 30);
    let all = vec![overdue.clone(), future.clone()];

    let score_overdue = engine().score(&overdue, &all, "smart_balance").score;
    let score_future = engine().score(&future, &all, "smart_balance").score;

    assert!(
        score_overdue > score_future,
        "Overdue task should outrank future task: {score_overdue} vs {score_future}"
    );
}

#[test]
fn test_five_days_overdue_beats_thirty_days_out() {
    let overdue = dated(1, -5);
    let future = dated(2, 30);
    let all = vec![overdue.clone(), future.clone()];

    let a = engine().score(&overdue, &all, "smart_balance");
    let b = engine().score(&future, &all, "smart_balance");
    assert!(a.score > b.score);
    assert_eq!(a.explanation, "High Urgency: Overdue by 5 days");
}

#[test]
fn test_urgency_ordering_overdue_imminent_future() {
    let overdue = dated(1, -5);
    let imminent = dated(2, 1);
    let future = dated(3, 10);
    let all = vec![overdue.clone(), imminent.clone(), future.clone()];

    let s1 = engine().score(&overdue, &all, "smart_balance").score;
    let s2 = engine().score(&imminent, &all, "smart_balance").score;
    let s3 = engine().score(&future, &all, "smart_balance").score;
    assert!(s1 > s2 && s2 > s3, "{s1} > {s2} > {s3} does not hold");
}

#[test]
fn test_scores_fall_as_deadline_recedes() {
    let mut previous = f64::INFINITY;
    for days in 2..=23 {
        let task = dated(1, days);
        let all = vec![task.clone()];
        let score = engine().score(&task, &all, "deadline_driven").score;
        assert!(score < previous, "score did not fall at {days} days");
        previous = score;
    }
}

#[test]
fn test_overdue_scores_rise_until_cap() {
    let mut previous = 0.0;
    for days in 1..=20 {
        let task = dated(1, -days);
        let all = vec![task.clone()];
        let result = engine().score(&task, &all, "deadline_driven");
        assert!(result.factors.urgency >= 1.0);
        assert!(result.score > previous, "score did not rise at {days} days overdue");
        previous = result.score;
    }

    let capped = dated(1, -60);
    let result = engine().score(&capped, &[capped.clone()], "deadline_driven");
    assert_eq!(result.factors.urgency, 2.0);
}

#[test]
fn test_quick_win_strategy() {
    let low_effort = TaskRecord::new("Quick Win")
        .with_id(1)
        .with_importance(3)
        .with_estimated_hours(1);
    let high_effort = TaskRecord::new("Big Project")
        .with_id(2)
        .with_importance(9)
        .with_estimated_hours(10);
    let all = vec![low_effort.clone(), high_effort.clone()];

    let low = engine().score(&low_effort, &all, "fastest_wins");
    let high = engine().score(&high_effort, &all, "fastest_wins");

    assert!(low.score > high.score, "Low effort task should win under fastest_wins");
    assert_eq!(low.explanation, "Quick Win: Only 1 hours");
}

#[test]
fn test_fastest_wins_prefers_fewer_hours_all_else_equal() {
    let one = TaskRecord::new("one").with_id(1).with_estimated_hours(1);
    let ten = TaskRecord::new("ten").with_id(2).with_estimated_hours(10);
    let all = vec![one.clone(), ten.clone()];

    assert!(
        engine().score(&one, &all, "fastest_wins").score
            > engine().score(&ten, &all, "fastest_wins").score
    );
}

#[test]
fn test_circular_dependency() {
    let task_a = TaskRecord::new("Task A").with_id(1).with_dependencies([2]);
    let task_b = TaskRecord::new("Task B").with_id(2).with_dependencies([1]);
    let all = vec![task_a.clone(), task_b.clone()];

    for task in &all {
        let result = engine().score(task, &all, "smart_balance");
        assert!(result.in_cycle);
        assert!(result.explanation.contains("Circular Dependency"));
    }
}

#[test]
fn test_self_dependency_is_cyclic() {
    let task = TaskRecord::new("Ouroboros").with_id(42).with_dependencies([42]);
    let all = vec![task.clone()];

    let result = engine().score(&task, &all, "high_impact");
    assert!(result.in_cycle);
    assert_eq!(result.explanation, "Circular Dependency Detected (Penalty Applied).");
}

#[test]
fn test_cycle_penalty_halves_otherwise_identical_score() {
    let cyclic = TaskRecord::new("cyclic").with_id(1).with_dependencies([1]);
    let plain = TaskRecord::new("plain").with_id(1);

    // Give the plain task the same blocks-others bonus the self-loop earns.
    let blocker = TaskRecord::new("blocker").with_id(2).with_dependencies([1]);
    let plain_batch = vec![plain.clone(), blocker];

    let penalized = engine().score(&cyclic, &[cyclic.clone()], "smart_balance").score;
    let full = engine().score(&plain, &plain_batch, "smart_balance").score;
    assert!((penalized - full * 0.5).abs() < 1e-12);
}

#[test]
fn test_unreferenced_task_has_no_dependency_bonus() {
    let lonely = TaskRecord::new("lonely").with_id(1).with_dependencies([2]);
    let other = TaskRecord::new("other").with_id(2);
    let all = vec![lonely.clone(), other.clone()];

    assert_eq!(engine().score(&lonely, &all, "smart_balance").factors.dependency, 0.0);
    assert_eq!(engine().score(&other, &all, "smart_balance").factors.dependency, 1.0);
}

#[test]
fn test_dependency_bonus_alone_is_not_named() {
    // The bonus is the largest contribution here, but 1.0 * 0.1 does not exceed the threshold.
    let blocker = TaskRecord::new("blocker")
        .with_id(1)
        .with_importance(1)
        .with_estimated_hours(10);
    let waiting = TaskRecord::new("waiting").with_id(2).with_dependencies([1]);
    let all = vec![blocker.clone(), waiting];

    let result = engine().score(&blocker, &all, "fastest_wins");
    assert_eq!(result.factors.dependency, 1.0);
    assert_eq!(result.explanation, "Balanced priority.");
}

#[test]
fn test_idempotent() {
    let task = dated(1, 3).with_dependencies([2, 3]);
    let all = vec![task.clone(), dated(2, 5).with_dependencies([1]), dated(3, -2)];

    let first = engine().score(&task, &all, "smart_balance");
    for _ in 0..10 {
        assert_eq!(engine().score(&task, &all, "smart_balance"), first);
    }
}

#[test]
fn test_unknown_strategy_equals_smart_balance() {
    let all = vec![
        dated(1, -3).with_dependencies([2]),
        dated(2, 4),
        TaskRecord::new("no id, no date"),
    ];
    for task in &all {
        assert_eq!(
            engine().score(task, &all, "definitely_not_a_strategy"),
            engine().score(task, &all, "smart_balance")
        );
    }
}

#[test]
fn test_every_strategy_is_reachable_by_name() {
    let task = dated(1, 1).with_importance(9).with_estimated_hours(1);
    let all = vec![task.clone()];
    let scores: Vec<f64> = Strategy::ALL
        .iter()
        .map(|s| engine().score(&task, &all, s.name()).score)
        .collect();
    // The four profiles weigh this task differently.
    for (i, a) in scores.iter().enumerate() {
        for b in &scores[i + 1..] {
            assert!((a - b).abs() > 1e-9);
        }
    }
}

#[test]
fn test_unknown_dependencies_never_panic() {
    let task = TaskRecord::new("refs")
        .with_id(1)
        .with_dependencies([1000, -4, 0, 1000]);
    let all = vec![task.clone()];
    let result = engine().score(&task, &all, "smart_balance");
    assert!(!result.in_cycle);
}

#[test]
fn test_out_of_range_importance_is_used_as_is() {
    let task = TaskRecord::new("loud").with_id(1).with_importance(20);
    let result = engine().score(&task, &[task.clone()], "high_impact");
    assert_eq!(result.factors.importance, 2.0);
    assert_eq!(result.explanation, "High Importance: Level 20");
}
