//! Weighted multi-factor `smart` strategy
//!
//! Five factors are scored on their own point scales, normalized to 0..=1,
//! weighted and summed:
//!
//! | Factor | Points | Source |
//! |--------|--------|--------|
//! | urgency | 30 | exponential decay of days until due |
//! | importance | 30 | importance 1..=10 mapped linearly |
//! | effort | 20 | inverse of estimated hours |
//! | dependency | 15 | 5 per dependency |
//! | blocking | 5 | 5 if any other task depends on this one |

use serde::{Deserialize, Serialize};

use super::{round_to, ScoringContext};
use crate::domain::TaskRecord;

const URGENCY_MAX: f64 = 30.0;
const IMPORTANCE_MAX: f64 = 30.0;
const EFFORT_MAX: f64 = 20.0;
const DEPENDENCY_MAX: f64 = 15.0;
const BLOCKING_MAX: f64 = 5.0;

/// Urgency (out of 100) for tasks without a due date
const UNDATED_URGENCY: f64 = 30.0;
/// Days over which urgency decays by a factor of e
const URGENCY_DECAY_DAYS: f64 = 7.0;
/// Keeps the effort term finite for zero-hour tasks
const EFFORT_EPSILON: f64 = 0.1;
const POINTS_PER_LINK: f64 = 5.0;

/// Relative weight of each factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
    pub blocking: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            urgency: 0.30,
            importance: 0.30,
            effort: 0.20,
            dependency: 0.15,
            blocking: 0.05,
        }
    }
}

impl Weights {
    /// Weights as `(name, value)` pairs
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("urgency", self.urgency),
            ("importance", self.importance),
            ("effort", self.effort),
            ("dependency", self.dependency),
            ("blocking", self.blocking),
        ]
    }
}

/// Normalized factor values, each in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Factors {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
    pub blocking: f64,
}

impl Factors {
    fn weighted_sum(&self, weights: &Weights) -> f64 {
        self.urgency * weights.urgency
            + self.importance * weights.importance
            + self.effort * weights.effort
            + self.dependency * weights.dependency
            + self.blocking * weights.blocking
    }

    fn rounded(&self, places: i32) -> Self {
        Self {
            urgency: round_to(self.urgency, places),
            importance: round_to(self.importance, places),
            effort: round_to(self.effort, places),
            dependency: round_to(self.dependency, places),
            blocking: round_to(self.blocking, places),
        }
    }
}

/// Urgency on a 0..=100 scale
fn urgency_raw(days: Option<i64>) -> f64 {
    match days {
        None => UNDATED_URGENCY,
        Some(days) if days < 0 => 100.0,
        Some(days) => (100.0 * (-(days as f64) / URGENCY_DECAY_DAYS).exp()).clamp(0.0, 100.0),
    }
}

/// Returns the 0..=100 score and its factors rounded to 3 decimals
pub(super) fn score(task: &TaskRecord, ctx: &ScoringContext<'_>) -> (f64, Factors) {
    let urgency = urgency_raw(ctx.days_until(task)) / 100.0 * URGENCY_MAX;
    let importance = (task.importance() - 1) as f64 / 9.0 * IMPORTANCE_MAX;
    let effort =
        (1.0 / (task.estimated_hours + EFFORT_EPSILON) * EFFORT_MAX).clamp(0.0, EFFORT_MAX);
    let dependency = (task.dependencies.len() as f64 * POINTS_PER_LINK).min(DEPENDENCY_MAX);
    let blocking =
        (ctx.blocking_count(task.effective_id()) as f64 * POINTS_PER_LINK).min(BLOCKING_MAX);

    let factors = Factors {
        urgency: urgency / URGENCY_MAX,
        importance: importance / IMPORTANCE_MAX,
        effort: effort / EFFORT_MAX,
        dependency: dependency / DEPENDENCY_MAX,
        blocking: blocking / BLOCKING_MAX,
    };

    let total = factors.weighted_sum(ctx.weights()) * 100.0;
    (round_to(total, 2), factors.rounded(3))
}
