//! Workday scheduler — lays a task snapshot out into non-overlapping
//! calendar fragments.
//!
//! Deterministic: no clock reads, no randomness. The caller supplies `now`
//! and gets the same layout for the same `(tasks, now)` every time.

use crate::task::{Task, TaskStatus};
use crate::workday::{
    align_start, hours_to_duration, is_weekend, next_workday, work_end, work_start,
};
use chrono::NaiveDateTime;
use serde::Serialize;

const DEFAULT_HOURS: f64 = 1.0;
const EPSILON_HOURS: f64 = 1e-9;

/// One contiguous scheduled interval belonging to a task. A task splits into
/// multiple fragments when it spans a workday boundary. Computed per run,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTask {
    pub task: Task,
    pub scheduled_start: NaiveDateTime,
    pub scheduled_end: NaiveDateTime,
    /// Rational sort key: negative for completed items, `index + day*0.1`
    /// for todo fragments. Informational — the output is ordered by
    /// `scheduled_start`, which need not agree with this field.
    pub order: f64,
}

/// Scheduling cursor threaded through one `schedule` call. Local to the call;
/// nothing leaks across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DayCursor {
    at: NaiveDateTime,
}

impl DayCursor {
    fn starting_at(now: NaiveDateTime) -> Self {
        Self { at: align_start(now) }
    }

    /// Move to the next weekday 09:00 while sitting on a weekend or on a day
    /// with no capacity left.
    fn normalize(&mut self) {
        while is_weekend(self.at.date()) || self.hours_left_today() <= EPSILON_HOURS {
            self.at = work_start(next_workday(self.at.date()));
        }
    }

    /// Fractional hours between the cursor and 15:00 today.
    fn hours_left_today(&self) -> f64 {
        let left = work_end(self.at.date()) - self.at;
        (left.num_milliseconds() as f64 / 3_600_000.0).max(0.0)
    }

    /// Consume up to `hours` from today, returning the emitted interval.
    fn take(&mut self, hours: f64) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.at;
        let end = start + hours_to_duration(hours);
        self.at = end;
        (start, end)
    }
}

/// Lay out a snapshot of tasks from `now`.
///
/// Todo tasks are sorted by due-date urgency (earliest first, no due date
/// last), then priority descending, ties keeping input order, and packed
/// back-to-back into 09:00–15:00 weekday windows, splitting across days as
/// needed. Completed tasks get synthetic historical slots on their creation
/// date and never consume capacity. Output is sorted by `scheduled_start`.
pub fn schedule(tasks: &[Task], now: NaiveDateTime) -> Vec<ScheduledTask> {
    let mut scheduled: Vec<ScheduledTask> = Vec::new();

    let completed: Vec<&Task> = tasks.iter().filter(|t| t.status == TaskStatus::Done).collect();
    let todo: Vec<&Task> = tasks.iter().filter(|t| t.status == TaskStatus::Todo).collect();

    // Completed tasks keep a synthetic slot at 09:00 on their creation date.
    // Presentation convention only: the negative order pins them ahead of
    // todo items in order-keyed views.
    for (i, task) in completed.iter().enumerate() {
        let start = work_start(task.created_at.date());
        let hours = task.estimated_hours.unwrap_or(DEFAULT_HOURS);
        scheduled.push(ScheduledTask {
            task: (*task).clone(),
            scheduled_start: start,
            scheduled_end: start + hours_to_duration(hours),
            order: -1000.0 + i as f64,
        });
    }

    let today = now.date();
    let mut sorted = todo;
    // sort_by is stable, so equal (urgency, priority) keeps input order.
    sorted.sort_by(|a, b| {
        urgency_days(a, today)
            .cmp(&urgency_days(b, today))
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let mut cursor = DayCursor::starting_at(now);

    for (index, task) in sorted.iter().enumerate() {
        let mut remaining = task.estimated_hours.unwrap_or(DEFAULT_HOURS);
        let mut day = 0u32;

        while remaining > EPSILON_HOURS {
            cursor.normalize();
            let chunk = remaining.min(cursor.hours_left_today());
            let (start, end) = cursor.take(chunk);

            scheduled.push(ScheduledTask {
                task: (*task).clone(),
                scheduled_start: start,
                scheduled_end: end,
                order: index as f64 + day as f64 * 0.1,
            });

            remaining -= chunk;
            day += 1;
        }
    }

    // Only externally guaranteed ordering; stable, so completed fragments
    // precede coincident todo fragments.
    scheduled.sort_by(|a, b| a.scheduled_start.cmp(&b.scheduled_start));
    scheduled
}

/// Sort key: whole days from `today` to the due date, 999 when absent.
fn urgency_days(task: &Task, today: chrono::NaiveDate) -> i64 {
    task.due_date
        .map(|due| crate::workday::days_until(due, today))
        .unwrap_or(999)
}
