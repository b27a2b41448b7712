//! Single-factor strategies: `fastest`, `impact` and `deadline`

use super::{round_to, ScoringContext};
use crate::domain::TaskRecord;

/// Favors low effort, with a small importance bonus
pub(super) fn fastest(task: &TaskRecord) -> f64 {
    let quickness = 1.0 / (task.estimated_hours + 0.1);
    round_to(quickness * 80.0 + task.importance() as f64 * 2.0, 2)
}

/// Importance as a percentage
pub(super) fn impact(task: &TaskRecord) -> f64 {
    round_to(task.importance() as f64 / 10.0 * 100.0, 2)
}

/// Linear urgency reaching zero 100 days out
pub(super) fn deadline(task: &TaskRecord, ctx: &ScoringContext<'_>) -> f64 {
    match ctx.days_until(task) {
        None => 40.0,
        Some(days) if days < 0 => 100.0,
        Some(days) => round_to((100.0 - days as f64).max(0.0), 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskIndex;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn deadline_in(days: Option<i64>) -> f64 {
        let mut task = TaskRecord::new("t");
        if let Some(days) = days {
            task = task.with_due(today() + Duration::days(days));
        }
        let index = TaskIndex::build(std::slice::from_ref(&task));
        deadline(&task, &ScoringContext::new(&index, today()))
    }

    #[test]
    fn fastest_rewards_short_tasks() {
        // 80 / 1.1 + 10
        let task = TaskRecord::new("t").with_hours(1.0).with_importance(5);
        assert_eq!(fastest(&task), 82.73);

        let quick = TaskRecord::new("t").with_hours(0.0).with_importance(1);
        assert_eq!(fastest(&quick), 802.0);
    }

    #[test]
    fn fastest_rounds_exact_ties_to_even() {
        // 80 / 25.6 + 2 = 5.125
        let task = TaskRecord::new("t").with_hours(25.5).with_importance(1);
        assert_eq!(fastest(&task), 5.12);
    }

    #[test]
    fn impact_is_importance_percentage() {
        assert_eq!(impact(&TaskRecord::new("t").with_importance(7)), 70.0);
        assert_eq!(impact(&TaskRecord::new("t").with_importance(0)), 10.0);
        assert_eq!(impact(&TaskRecord::new("t").with_importance(11)), 100.0);
    }

    #[test]
    fn deadline_scores() {
        assert_eq!(deadline_in(None), 40.0);
        assert_eq!(deadline_in(Some(-1)), 100.0);
        assert_eq!(deadline_in(Some(0)), 100.0);
        assert_eq!(deadline_in(Some(25)), 75.0);
        assert_eq!(deadline_in(Some(100)), 0.0);
        assert_eq!(deadline_in(Some(365)), 0.0);
    }
}
