//! Task model for the scheduling engine.
//!
//! The engine treats `Task` as an immutable value: status transitions happen
//! in whatever layer owns persistence, which hands the engine a fresh snapshot.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Done,
}

/// Priority tier, 0 (Low) through 3 (Urgent). Set once at creation by the
/// classifier and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 0,
    Medium = 1,
    High = 2,
    Urgent = 3,
}

/// Core task type.
///
/// Note: we keep this small + serializable. Storage is a later layer; the CLI
/// persists it verbatim as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,

    pub status: TaskStatus,
    pub priority: Priority,

    /// Hours. None falls back to 1h at schedule time.
    pub estimated_hours: Option<f64>,

    /// Optional due date (local calendar date).
    pub due_date: Option<NaiveDate>,

    /// Creation instant in local wall-clock time, immutable.
    pub created_at: NaiveDateTime,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: Priority::Low,
            estimated_hours: None,
            due_date: None,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }
}
