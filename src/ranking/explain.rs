//! Human-readable justifications for suggestions

use chrono::NaiveDate;

use crate::domain::{days_until, TaskRecord};

pub const PAST_DUE: &str = "Past due, needs immediate attention";
pub const DUE_SOON: &str = "Due very soon";
pub const HIGH_IMPORTANCE: &str = "High importance";
pub const QUICK_WIN: &str = "Quick win";
// Triggered by having dependencies, not by being depended upon
pub const BLOCKS_OTHERS: &str = "Blocks other tasks";
pub const BALANCED_PRIORITY: &str = "Balanced priority (no single dominating factor)";

const DUE_SOON_DAYS: i64 = 2;
const HIGH_IMPORTANCE_MIN: i64 = 8;
const QUICK_WIN_MAX_HOURS: f64 = 2.0;

/// One sentence summarizing the task's raw attributes
pub fn explanation(task: &TaskRecord, today: NaiveDate) -> String {
    let mut parts = vec![format!("Importance: {}", task.importance)];
    if let Some(days) = days_until(task.due(), today) {
        parts.push(format!("Due in {} days", days));
    }
    parts.push(format!("Estimated hours: {:?}", task.estimated_hours));
    if task.has_dependencies() {
        parts.push(format!("Depends on {} tasks", task.dependencies.len()));
    }
    parts.join(". ")
}

/// Qualitative reasons a task ranks highly
pub fn reasons(task: &TaskRecord, today: NaiveDate) -> Vec<&'static str> {
    let mut why = Vec::new();

    match days_until(task.due(), today) {
        Some(days) if days < 0 => why.push(PAST_DUE),
        Some(days) if days <= DUE_SOON_DAYS => why.push(DUE_SOON),
        _ => {}
    }
    if task.importance() >= HIGH_IMPORTANCE_MIN {
        why.push(HIGH_IMPORTANCE);
    }
    if task.estimated_hours <= QUICK_WIN_MAX_HOURS {
        why.push(QUICK_WIN);
    }
    if task.has_dependencies() {
        why.push(BLOCKS_OTHERS);
    }

    if why.is_empty() {
        why.push(BALANCED_PRIORITY);
    }
    why
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn explanation_lists_present_fields() {
        let task = TaskRecord::new("t")
            .with_importance(6)
            .with_hours(3.0)
            .with_due(today() + Duration::days(4))
            .with_dependencies(["a", "b"]);
        assert_eq!(
            explanation(&task, today()),
            "Importance: 6. Due in 4 days. Estimated hours: 3.0. Depends on 2 tasks"
        );
    }

    #[test]
    fn explanation_omits_missing_clauses() {
        let task = TaskRecord::new("t").with_due_date("not a date");
        assert_eq!(
            explanation(&task, today()),
            "Importance: 5. Estimated hours: 1.0"
        );
    }

    #[test]
    fn explanation_shows_importance_as_supplied() {
        let high = TaskRecord::new("t").with_importance(15);
        assert_eq!(explanation(&high, today()), "Importance: 15. Estimated hours: 1.0");

        let low = TaskRecord::new("t").with_importance(-2);
        assert!(explanation(&low, today()).starts_with("Importance: -2."));
    }

    #[test]
    fn due_soon_window_is_inclusive() {
        for days in 0..=2 {
            let task = TaskRecord::new("t").with_hours(5.0).with_due(today() + Duration::days(days));
            assert_eq!(reasons(&task, today()), vec![DUE_SOON]);
        }
        let later = TaskRecord::new("t").with_hours(5.0).with_due(today() + Duration::days(3));
        assert_eq!(reasons(&later, today()), vec![BALANCED_PRIORITY]);
    }

    #[test]
    fn overdue_is_not_also_due_soon() {
        let task = TaskRecord::new("t").with_hours(5.0).with_due(today() - Duration::days(1));
        assert_eq!(reasons(&task, today()), vec![PAST_DUE]);
    }

    #[test]
    fn having_dependencies_reads_as_blocking() {
        let task = TaskRecord::new("t").with_hours(5.0).with_dependencies(["x"]);
        assert_eq!(reasons(&task, today()), vec![BLOCKS_OTHERS]);
    }

    #[test]
    fn all_reasons_in_order() {
        let task = TaskRecord::new("t")
            .with_due(today() + Duration::days(1))
            .with_importance(8)
            .with_hours(2.0)
            .with_dependencies(["x"]);
        assert_eq!(
            reasons(&task, today()),
            vec![DUE_SOON, HIGH_IMPORTANCE, QUICK_WIN, BLOCKS_OTHERS]
        );
    }
}
