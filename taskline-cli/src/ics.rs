use anyhow::Result;
use taskline_core::time::to_utc;
use taskline_core::ScheduledTask;

/// Emit a minimal ICS calendar with one VEVENT per scheduled fragment.
///
/// DTSTART/DTEND are UTC, converted from the schedule's local wall-clock in
/// the given IANA timezone.
pub fn schedule_to_ics(scheduled: &[ScheduledTask], tz: &str) -> Result<String> {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//Taskline//EN\n");

    for (i, frag) in scheduled.iter().enumerate() {
        let start = to_utc(frag.scheduled_start, tz)?;
        let end = to_utc(frag.scheduled_end, tz)?;

        let description = format!(
            "TaskId: {}\nPriority: {:?}\nStatus: {:?}\n",
            frag.task.id, frag.task.priority, frag.task.status
        );

        s.push_str("BEGIN:VEVENT\n");
        s.push_str(&format!("UID:taskline-{}@taskline\n", i));
        s.push_str(&format!("DTSTART:{}\n", start.format("%Y%m%dT%H%M%SZ")));
        s.push_str(&format!("DTEND:{}\n", end.format("%Y%m%dT%H%M%SZ")));
        s.push_str(&format!("SUMMARY:{}\n", escape_ics(&frag.task.title)));
        s.push_str(&format!("DESCRIPTION:{}\n", escape_ics(&description)));
        s.push_str("END:VEVENT\n");
    }

    s.push_str("END:VCALENDAR\n");
    Ok(s)
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskline_core::{schedule, Task};

    #[test]
    fn test_one_vevent_per_fragment_in_utc() {
        let created = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        // 8h task splits into two fragments.
        let tasks = vec![Task::new("task-0001", "Big push, part; one", created).with_hours(8.0)];

        let ics = schedule_to_ics(&schedule(&tasks, now), "America/Chicago").unwrap();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        // Mar is CST (UTC-6): Mon 09:00 local = 15:00Z.
        assert!(ics.contains("DTSTART:20260302T150000Z"));
        assert!(ics.contains("DTEND:20260302T210000Z"));
        assert!(ics.contains("SUMMARY:Big push\\, part\\; one"));
    }

    #[test]
    fn test_escape_ics() {
        assert_eq!(escape_ics("a,b;c\nd"), "a\\,b\\;c\\nd");
    }
}
