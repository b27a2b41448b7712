//! Additive `simple` strategy

use super::{round_to, ScoringContext};
use crate::domain::TaskRecord;

const IMPORTANCE_POINTS: f64 = 8.0;
const NO_DUE_DATE_POINTS: f64 = 5.0;
const OVERDUE_BASE: f64 = 60.0;
const OVERDUE_FLOOR_DAYS: i64 = -30;
const URGENCY_WINDOW_DAYS: i64 = 30;
const EFFORT_PENALTY_PER_HOUR: f64 = 2.0;
const DEPENDENCY_BONUS: f64 = 6.0;

/// Importance, due date, effort and dependency count summed into 0..=100
pub(super) fn score(task: &TaskRecord, ctx: &ScoringContext<'_>) -> f64 {
    let importance = task.importance() as f64 * IMPORTANCE_POINTS;

    let due = match ctx.days_until(task) {
        None => NO_DUE_DATE_POINTS,
        // Lateness stops adding weight past 30 days
        Some(days) if days < 0 => OVERDUE_BASE + days.max(OVERDUE_FLOOR_DAYS) as f64,
        Some(days) => (URGENCY_WINDOW_DAYS - days).max(0) as f64,
    };

    let effort_penalty = task.estimated_hours * EFFORT_PENALTY_PER_HOUR;
    let dependency_bonus = task.dependencies.len() as f64 * DEPENDENCY_BONUS;

    let raw = importance + due - effort_penalty + dependency_bonus;
    round_to(raw.clamp(0.0, 100.0), 2)
}
