//! Task creation boundary: validate a draft, classify it once, and bake the
//! result into the new task.

use crate::classifier::classify;
use crate::task::{Task, TaskStatus};
use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Build a todo task from a draft. Classification runs here and nowhere
/// else; the priority and hour estimate are persisted with the task and
/// never recomputed.
pub fn create_task(id: impl Into<String>, draft: &TaskDraft, now: NaiveDateTime) -> Result<Task> {
    let title = draft.title.trim();
    if title.is_empty() {
        bail!("task title is required");
    }

    if let Some(due) = draft.due_date {
        if due < now.date() {
            bail!("due date cannot be in the past");
        }
    }

    let analysis = classify(
        title,
        draft.description.as_deref().unwrap_or(""),
        draft.due_date,
        now.date(),
    );

    let mut task = Task::new(id, title, now)
        .with_status(TaskStatus::Todo)
        .with_priority(analysis.priority)
        .with_hours(analysis.estimated_hours);
    task.description = draft.description.clone();
    task.due_date = draft.due_date;
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::{Days, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_rejects_blank_title() {
        let draft = TaskDraft {
            title: "   ".to_string(),
            ..Default::default()
        };
        let err = create_task("task-0001", &draft, now()).unwrap_err();
        assert!(err.to_string().contains("title is required"));
    }

    #[test]
    fn test_rejects_past_due_date() {
        let draft = TaskDraft {
            title: "write report".to_string(),
            due_date: Some(now().date() - Days::new(1)),
            ..Default::default()
        };
        let err = create_task("task-0001", &draft, now()).unwrap_err();
        assert!(err.to_string().contains("cannot be in the past"));
    }

    #[test]
    fn test_due_today_is_allowed() {
        let draft = TaskDraft {
            title: "write report".to_string(),
            due_date: Some(now().date()),
            ..Default::default()
        };
        assert!(create_task("task-0001", &draft, now()).is_ok());
    }

    #[test]
    fn test_classification_is_baked_in() {
        let draft = TaskDraft {
            title: "URGENT research analysis".to_string(),
            description: Some("complex work".to_string()),
            due_date: None,
        };
        let task = create_task("task-0001", &draft, now()).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::Medium); // lone "urgent" scores 2
        assert_eq!(task.estimated_hours, Some(3.0)); // intensity 6 caps at 3h
        assert_eq!(task.created_at, now());
        assert_eq!(task.description.as_deref(), Some("complex work"));
    }
}
