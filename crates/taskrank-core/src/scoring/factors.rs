//! Per-factor normalization.
//!
//! Each function maps one task attribute onto a comparable scale so the
//! strategy weights can combine them. Importance and effort land in roughly
//! [0, 1]; urgency can reach 2.0 for long-overdue work.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Urgency ceiling, reached 20 days past due.
pub const MAX_URGENCY: f64 = 2.0;

/// Urgency growth per day overdue.
const OVERDUE_STEP: f64 = 0.05;

/// Days before the deadline during which urgency stays flat at 1.0.
const RED_ZONE_DAYS: i64 = 2;

/// Days over which urgency decays to zero after the red zone.
const DECAY_DAYS: f64 = 21.0;

/// Normalized urgency together with the day offset it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Urgency {
    pub score: f64,
    /// Signed days from today to the due date; negative when overdue.
    pub days_until_due: Option<i64>,
}

impl Urgency {
    pub fn is_overdue(&self) -> bool {
        matches!(self.days_until_due, Some(days) if days < 0)
    }
}

/// Normalized values of the four factors, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorScores {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

/// Calculate deadline urgency.
///
/// - No due date: 0.0
/// - Overdue: 1.0 plus 0.05 per day overdue, capped at 2.0
/// - Due within 0-2 days: 1.0
/// - Further out: linear decay, reaching 0.0 at 23 days
pub fn urgency(due_date: Option<NaiveDate>, today: NaiveDate) -> Urgency {
    let Some(due) = due_date else {
        return Urgency {
            score: 0.0,
            days_until_due: None,
        };
    };

    let days = due.signed_duration_since(today).num_days();
    let score = if days < 0 {
        let days_overdue = -days;
        MAX_URGENCY.min(1.0 + days_overdue as f64 * OVERDUE_STEP)
    } else if days <= RED_ZONE_DAYS {
        1.0
    } else {
        let remaining = (days - RED_ZONE_DAYS) as f64;
        (1.0 - remaining / DECAY_DAYS).max(0.0)
    };

    Urgency {
        score,
        days_until_due: Some(days),
    }
}

/// Rescale importance from [1, 10] to [0.1, 1.0]. Out-of-range input passes through.
pub fn importance(level: i64) -> f64 {
    level as f64 / 10.0
}

/// Reward quick wins.
///
/// - Up to 2 hours: 1.0
/// - Over 8 hours: 0.0
/// - Between: linear, `(8 - hours) / 6`
pub fn effort(estimated_hours: i64) -> f64 {
    if estimated_hours <= 2 {
        1.0
    } else if estimated_hours > 8 {
        0.0
    } else {
        (8 - estimated_hours) as f64 / 6.0
    }
}
