//! Workday calendar math shared by the scheduler.
//!
//! Fixed 09:00–15:00 workday, weekends off, no holiday calendar.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

pub const WORK_START_HOUR: u32 = 9;
pub const WORK_END_HOUR: u32 = 15;
pub const HOURS_PER_DAY: f64 = 6.0;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 09:00 on the given date.
pub fn work_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(WORK_START_HOUR, 0, 0).unwrap())
}

/// 15:00 on the given date.
pub fn work_end(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(WORK_END_HOUR, 0, 0).unwrap())
}

/// Next calendar day that is not a weekend.
pub fn next_workday(date: NaiveDate) -> NaiveDate {
    let mut d = date + Days::new(1);
    while is_weekend(d) {
        d = d + Days::new(1);
    }
    d
}

/// Snap a reference instant to the scheduling start cursor:
/// before 09:00 → 09:00 today; 15:00 or later → 09:00 next day (never into
/// the past); otherwise the top of the current hour. Weekend normalization is
/// the scheduler's job.
pub fn align_start(now: NaiveDateTime) -> NaiveDateTime {
    let hour = now.hour();
    if hour < WORK_START_HOUR {
        work_start(now.date())
    } else if hour >= WORK_END_HOUR {
        work_start(now.date() + Days::new(1))
    } else {
        now.date()
            .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }
}

/// Whole calendar days from `today` to `due` (negative when overdue).
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}
