//! Named weighting profiles.
//!
//! The registry is fixed. Name lookup never fails: anything unrecognised
//! resolves to [`Strategy::SmartBalance`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative influence of each scoring factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

/// Built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Deadline and importance first, with a little effort and dependency.
    #[default]
    SmartBalance,
    /// Reward quick wins.
    FastestWins,
    /// Almost entirely deadline driven.
    DeadlineDriven,
    /// Almost entirely importance driven.
    HighImpact,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::DeadlineDriven,
        Strategy::HighImpact,
    ];

    /// Registry key for this strategy.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::DeadlineDriven => "deadline_driven",
            Strategy::HighImpact => "high_impact",
        }
    }

    /// Exact-match lookup. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Strategy> {
        Strategy::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Lookup with the default fallback applied.
    pub fn resolve(name: &str) -> Strategy {
        match Strategy::from_name(name) {
            Some(strategy) => strategy,
            None => {
                tracing::debug!(
                    requested = name,
                    fallback = Strategy::default().name(),
                    "unknown strategy, using default"
                );
                Strategy::default()
            }
        }
    }

    pub fn weights(self) -> StrategyWeights {
        match self {
            Strategy::SmartBalance => StrategyWeights {
                urgency: 0.45,
                importance: 0.35,
                effort: 0.1,
                dependency: 0.1,
            },
            Strategy::FastestWins => StrategyWeights {
                urgency: 0.1,
                importance: 0.1,
                effort: 0.7,
                dependency: 0.1,
            },
            Strategy::DeadlineDriven => StrategyWeights {
                urgency: 0.8,
                importance: 0.1,
                effort: 0.05,
                dependency: 0.05,
            },
            Strategy::HighImpact => StrategyWeights {
                urgency: 0.1,
                importance: 0.8,
                effort: 0.05,
                dependency: 0.05,
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
