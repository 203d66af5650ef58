//! Human-readable explanation of a score.

use serde::{Deserialize, Serialize};

use super::factors::Urgency;
use super::strategy::StrategyWeights;
use super::FactorScores;

/// Explanation used whenever a task sits on a dependency cycle.
pub const CYCLE_EXPLANATION: &str = "Circular Dependency Detected (Penalty Applied).";

/// Explanation used when no factor stands out.
pub const BALANCED_EXPLANATION: &str = "Balanced priority.";

/// A weighted contribution must exceed this to be named as the reason.
pub const EXPLANATION_THRESHOLD: f64 = 0.1;

/// Scoring factors in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Urgency,
    Importance,
    Effort,
    Dependency,
}

impl Factor {
    pub const ALL: [Factor; 4] = [
        Factor::Urgency,
        Factor::Importance,
        Factor::Effort,
        Factor::Dependency,
    ];
}

/// Factor scores after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Contributions {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Contributions {
    pub fn weigh(factors: &FactorScores, weights: &StrategyWeights) -> Self {
        Self {
            urgency: factors.urgency * weights.urgency,
            importance: factors.importance * weights.importance,
            effort: factors.effort * weights.effort,
            dependency: factors.dependency * weights.dependency,
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Urgency => self.urgency,
            Factor::Importance => self.importance,
            Factor::Effort => self.effort,
            Factor::Dependency => self.dependency,
        }
    }

    /// Sum in factor order.
    pub fn total(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }

    /// Largest contribution. Ties go to the factor listed first in [`Factor::ALL`].
    pub fn dominant(&self) -> (Factor, f64) {
        let mut best = (Factor::Urgency, self.urgency);
        for factor in &Factor::ALL[1..] {
            let value = self.get(*factor);
            if value > best.1 {
                best = (*factor, value);
            }
        }
        best
    }
}

/// Inputs needed to phrase an explanation.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationInput {
    pub contributions: Contributions,
    pub urgency: Urgency,
    pub importance: i64,
    pub estimated_hours: i64,
    pub in_cycle: bool,
}

/// Pick the explanation for a scored task.
pub fn explain(input: &ExplanationInput) -> String {
    if input.in_cycle {
        return CYCLE_EXPLANATION.to_string();
    }

    let (factor, value) = input.contributions.dominant();
    if value <= EXPLANATION_THRESHOLD {
        return BALANCED_EXPLANATION.to_string();
    }

    match factor {
        Factor::Urgency => match input.urgency.days_until_due {
            Some(days) if days < 0 => format!("High Urgency: Overdue by {} days", -days),
            Some(days) => format!("High Urgency: Due in {days} days"),
            None => BALANCED_EXPLANATION.to_string(),
        },
        Factor::Importance => format!("High Importance: Level {}", input.importance),
        Factor::Effort => format!("Quick Win: Only {} hours", input.estimated_hours),
        Factor::Dependency => "Critical: Blocks other tasks".to_string(),
    }
}
