//! Rule-based priority and effort classification.
//!
//! No LLM needed — a fixed keyword table plus due-date urgency covers the
//! intake heuristics. Runs once, at task creation; the result is persisted
//! and never recomputed.

use crate::task::Priority;
use crate::workday::days_until;
use chrono::NaiveDate;

/// Classifier output, persisted verbatim onto the created task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub priority: Priority,
    pub estimated_hours: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    Priority,
    Intensity,
}

// (keyword, axis, weight). Matching is substring containment over the
// lowercased "{title} {description}" text, not tokenized, so overlapping
// spans may double-count ("high priority" also matches "priority").
const KEYWORD_RULES: &[(&str, Axis, f64)] = &[
    // Urgency
    ("urgent", Axis::Priority, 2.0),
    ("asap", Axis::Priority, 2.0),
    ("immediately", Axis::Priority, 2.0),
    ("critical", Axis::Priority, 2.0),
    ("emergency", Axis::Priority, 2.0),
    ("deadline", Axis::Priority, 2.0),
    // High priority
    ("important", Axis::Priority, 1.5),
    ("high priority", Axis::Priority, 1.5),
    ("soon", Axis::Priority, 1.5),
    ("quickly", Axis::Priority, 1.5),
    ("priority", Axis::Priority, 1.5),
    ("must", Axis::Priority, 1.5),
    // Medium
    ("moderate", Axis::Priority, 0.5),
    ("standard", Axis::Priority, 0.5),
    ("normal", Axis::Priority, 0.5),
    ("regular", Axis::Priority, 0.5),
    // Low
    ("low", Axis::Priority, -1.0),
    ("minor", Axis::Priority, -1.0),
    ("later", Axis::Priority, -1.0),
    ("when possible", Axis::Priority, -1.0),
    ("optional", Axis::Priority, -1.0),
    ("break", Axis::Priority, -1.0),
    ("casual", Axis::Priority, -1.0),
    ("informal", Axis::Priority, -1.0),
    // High intensity
    ("complex", Axis::Intensity, 2.0),
    ("difficult", Axis::Intensity, 2.0),
    ("research", Axis::Intensity, 2.0),
    ("analysis", Axis::Intensity, 2.0),
    ("development", Axis::Intensity, 2.0),
    ("design", Axis::Intensity, 2.0),
    ("implementation", Axis::Intensity, 2.0),
    ("testing", Axis::Intensity, 2.0),
    ("review", Axis::Intensity, 2.0),
    // Medium intensity
    ("update", Axis::Intensity, 1.0),
    ("modify", Axis::Intensity, 1.0),
    ("check", Axis::Intensity, 1.0),
    ("fix", Axis::Intensity, 1.0),
    ("optimize", Axis::Intensity, 1.0),
    ("meeting", Axis::Intensity, 1.0),
    ("standup", Axis::Intensity, 1.0),
    // Low intensity
    ("simple", Axis::Intensity, 0.5),
    ("easy", Axis::Intensity, 0.5),
    ("quick", Axis::Intensity, 0.5),
    ("basic", Axis::Intensity, 0.5),
    ("minor", Axis::Intensity, 0.5),
    ("small", Axis::Intensity, 0.5),
    ("break", Axis::Intensity, 0.5),
    ("short", Axis::Intensity, 0.5),
];

/// Ordinal urgency from days-until-due: due today or overdue scores highest,
/// anything beyond 10 days (or no due date) scores 0.
pub fn due_date_urgency(due_date: Option<NaiveDate>, today: NaiveDate) -> i32 {
    let Some(due) = due_date else { return 0 };
    match days_until(due, today) {
        d if d <= 0 => 5,
        1 => 4,
        2 => 3,
        d if d <= 5 => 2,
        d if d <= 10 => 1,
        _ => 0,
    }
}

/// Classify a task into a priority tier, an effort estimate in hours and a
/// confidence score. Pure and total: identical inputs (including `today`)
/// yield identical output, and no input can make it fail.
pub fn classify(
    title: &str,
    description: &str,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Classification {
    let text = format!("{} {}", title, description).to_lowercase();

    let mut priority_score = 0.0;
    let mut intensity_score = 0.0;
    let mut keyword_matches = 0u32;

    for (keyword, axis, weight) in KEYWORD_RULES {
        if text.contains(keyword) {
            match axis {
                Axis::Priority => priority_score += weight,
                Axis::Intensity => intensity_score += weight,
            }
            keyword_matches += 1;
        }
    }

    // Due date is the dominant signal: at >= 3 it replaces the keyword score
    // outright, below that it only adds.
    let urgency = due_date_urgency(due_date, today);
    if urgency >= 3 {
        priority_score = urgency as f64;
    } else {
        priority_score += urgency as f64;
    }

    // Effort derives from intensity alone.
    let mut estimated_hours = if intensity_score >= 4.0 {
        3.0
    } else if intensity_score >= 2.0 {
        2.0
    } else if intensity_score >= 1.0 {
        1.5
    } else {
        1.0
    };

    // Special cases for common tasks. Each assignment is absolute and the
    // checks run in this fixed order, so a later match wins — including over
    // a due-date-dominated score.
    if contains_any(&text, &["standup", "daily", "morning"]) {
        estimated_hours = 0.5;
        priority_score = 0.0;
    }
    if contains_any(&text, &["break", "lunch", "coffee"]) {
        estimated_hours = 0.5;
        priority_score = -1.0;
    }
    if contains_any(&text, &["review", "code review"]) {
        estimated_hours = 1.5;
    }
    if contains_any(&text, &["testing", "test"]) {
        estimated_hours = 2.0;
    }

    let priority = if priority_score >= 4.5 {
        Priority::Urgent
    } else if priority_score >= 3.0 {
        Priority::High
    } else if priority_score >= 1.5 {
        Priority::Medium
    } else {
        Priority::Low
    };

    let confidence = (keyword_matches as f64 / 3.0).min(1.0);

    Classification {
        priority,
        estimated_hours,
        confidence,
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
