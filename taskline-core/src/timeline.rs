//! Day-grouped views over a schedule, for timeline presentation.

use crate::scheduler::ScheduledTask;
use crate::task::TaskStatus;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::collections::HashSet;

/// All fragments starting on one calendar date, start-ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub fragments: Vec<ScheduledTask>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimelineSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub fragments: usize,
    /// Sum of fragment durations, in hours.
    pub scheduled_hours: f64,
}

/// Bucket fragments by start date, days ascending. Assumes the input is
/// start-sorted (as `schedule` guarantees), so each day's fragments stay
/// ordered.
pub fn group_by_day(scheduled: &[ScheduledTask]) -> Vec<TimelineDay> {
    let mut days: BTreeMap<NaiveDate, Vec<ScheduledTask>> = BTreeMap::new();
    for frag in scheduled {
        days.entry(frag.scheduled_start.date())
            .or_default()
            .push(frag.clone());
    }
    days.into_iter()
        .map(|(date, fragments)| TimelineDay { date, fragments })
        .collect()
}

/// First and last fragment dates, None for an empty schedule.
pub fn span(scheduled: &[ScheduledTask]) -> Option<(NaiveDate, NaiveDate)> {
    let first = scheduled.iter().map(|s| s.scheduled_start.date()).min()?;
    let last = scheduled.iter().map(|s| s.scheduled_start.date()).max()?;
    Some((first, last))
}

/// Distinct-task and hour totals for a schedule. Hours count each fragment
/// once, so a split task contributes exactly its estimate.
pub fn summarize(scheduled: &[ScheduledTask]) -> TimelineSummary {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut summary = TimelineSummary::default();

    for frag in scheduled {
        summary.fragments += 1;
        summary.scheduled_hours +=
            (frag.scheduled_end - frag.scheduled_start).num_milliseconds() as f64 / 3_600_000.0;

        if seen.insert(frag.task.id.as_str()) {
            summary.total_tasks += 1;
            match frag.task.status {
                TaskStatus::Done => summary.completed_tasks += 1,
                TaskStatus::Todo => summary.pending_tasks += 1,
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::schedule;
    use crate::task::{Task, TaskStatus};
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<ScheduledTask> {
        let tasks = vec![
            Task::new("done", "done", dt(2026, 2, 23, 10))
                .with_status(TaskStatus::Done)
                .with_hours(1.0),
            Task::new("big", "big", dt(2026, 2, 24, 10)).with_hours(8.0),
            Task::new("small", "small", dt(2026, 2, 25, 10)).with_hours(2.0),
        ];
        schedule(&tasks, dt(2026, 3, 2, 9))
    }

    #[test]
    fn test_group_by_day_buckets_and_orders() {
        let days = group_by_day(&sample());
        // done slot on Feb 23, big Mon+Tue, small Tue.
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(days[2].date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        assert_eq!(days[2].fragments.len(), 2);
        assert_eq!(days[2].fragments[0].task.id, "big");
        assert_eq!(days[2].fragments[1].task.id, "small");
    }

    #[test]
    fn test_span() {
        assert_eq!(
            span(&sample()),
            Some((
                NaiveDate::from_ymd_opt(2026, 2, 23).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
            ))
        );
        assert_eq!(span(&[]), None);
    }

    #[test]
    fn test_summarize_counts_tasks_once() {
        let summary = summarize(&sample());
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.pending_tasks, 2);
        assert_eq!(summary.fragments, 4); // done + big x2 + small
        assert!((summary.scheduled_hours - 11.0).abs() < 1e-9);
    }
}
