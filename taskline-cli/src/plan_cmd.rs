use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use clap::Args;
use regex::Regex;
use std::path::Path;
use taskline_core::time::{parse_local_datetime, to_local};
use taskline_core::{group_by_day, schedule, summarize, Task};

use crate::config::load_config;
use crate::ics::schedule_to_ics;
use crate::store::load_snapshot;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Override the reference instant, local wall-clock ("YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub now: Option<String>,

    /// Only plan tasks whose title matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Emit an ICS calendar instead of the text timeline
    #[arg(long, default_value_t = false)]
    pub ics: bool,
}

pub fn run(args: PlanArgs, snapshot_path: &Path) -> Result<()> {
    let cfg = load_config()?;
    let snapshot = load_snapshot(snapshot_path)?;

    let now = resolve_now(args.now.as_deref(), &cfg.schedule.timezone)?;

    let tasks: Vec<Task> = match args.filter.as_deref() {
        Some(pattern) => {
            let re = Regex::new(pattern).with_context(|| format!("invalid filter: {pattern}"))?;
            snapshot
                .tasks
                .into_iter()
                .filter(|t| re.is_match(&t.title))
                .collect()
        }
        None => snapshot.tasks,
    };

    let scheduled = schedule(&tasks, now);

    if args.ics {
        print!("{}", schedule_to_ics(&scheduled, &cfg.schedule.timezone)?);
        return Ok(());
    }

    if scheduled.is_empty() {
        println!("Nothing to plan. Add tasks with: taskline add <title>");
        return Ok(());
    }

    println!("# Plan from {}\n", now.format("%Y-%m-%d %H:%M"));

    for day in group_by_day(&scheduled) {
        println!("## {}", day.date.format("%a %Y-%m-%d"));
        for frag in &day.fragments {
            let hours = (frag.scheduled_end - frag.scheduled_start).num_minutes() as f64 / 60.0;
            println!(
                "  {}-{}  {}  [{:?}] {} ({}h)",
                frag.scheduled_start.format("%H:%M"),
                frag.scheduled_end.format("%H:%M"),
                frag.task.id,
                frag.task.priority,
                frag.task.title,
                hours
            );
        }
        println!();
    }

    let summary = summarize(&scheduled);
    println!(
        "{} tasks ({} done, {} pending), {} fragments, {:.1}h scheduled",
        summary.total_tasks,
        summary.completed_tasks,
        summary.pending_tasks,
        summary.fragments,
        summary.scheduled_hours
    );

    Ok(())
}

/// The engine never reads the clock; the CLI resolves "now" here, either from
/// the override or from the wall clock converted into the configured tz.
fn resolve_now(override_now: Option<&str>, tz: &str) -> Result<NaiveDateTime> {
    match override_now {
        Some(s) => parse_local_datetime(s),
        None => to_local(Utc::now(), tz),
    }
}
