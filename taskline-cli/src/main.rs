use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use taskline_core::time::{parse_due_date, to_local};
use taskline_core::{classify, create_task, TaskDraft, TaskStatus};

mod config;
mod ics;
mod plan_cmd;
mod store;

#[derive(Parser, Debug)]
#[command(
    name = "taskline",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKLINE_BUILD_SHA"), ")"),
    about = "Local task list with priority classification and workday planning"
)]
struct Cli {
    /// Snapshot file (default: ~/.taskline/tasks.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a task; priority and hours are classified once, here
    Add {
        title: String,

        #[arg(long)]
        desc: Option<String>,

        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks, newest first
    List {
        /// Only titles matching this regex
        #[arg(long)]
        filter: Option<String>,
    },

    /// Mark a task done
    Done { id: String },

    /// Reopen a done task
    Reopen { id: String },

    /// Delete a task
    Rm { id: String },

    /// Dry-run the classifier without storing anything
    Classify {
        title: String,

        #[arg(long)]
        desc: Option<String>,

        #[arg(long)]
        due: Option<String>,
    },

    /// Lay the todo list out into a workday timeline
    Plan(plan_cmd::PlanArgs),

    /// Write a default ~/.taskline/config.toml
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let snapshot_path = match cli.file {
        Some(p) => p,
        None => store::default_snapshot_path()?,
    };

    match cli.command {
        Command::Add { title, desc, due } => {
            let cfg = config::load_config()?;
            let now = to_local(Utc::now(), &cfg.schedule.timezone)?;

            let draft = TaskDraft {
                title,
                description: desc,
                due_date: due.as_deref().map(parse_due_date).transpose()?,
            };

            let mut snapshot = store::load_snapshot(&snapshot_path)?;
            let id = store::next_task_id(&snapshot);
            let task = create_task(&id, &draft, now)?;

            println!(
                "{}  [{:?}] {} ({}h estimated)",
                task.id,
                task.priority,
                task.title,
                task.estimated_hours.unwrap_or(1.0)
            );

            store::add_task(&mut snapshot, task)?;
            store::save_snapshot(&snapshot_path, &snapshot)?;
        }

        Command::List { filter } => {
            let snapshot = store::load_snapshot(&snapshot_path)?;
            let re = filter
                .as_deref()
                .map(Regex::new)
                .transpose()
                .context("invalid filter")?;

            let mut tasks: Vec<_> = snapshot
                .tasks
                .iter()
                .filter(|t| re.as_ref().map_or(true, |re| re.is_match(&t.title)))
                .collect();
            tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            for t in tasks {
                let due = t
                    .due_date
                    .map(|d| format!(" due {}", d))
                    .unwrap_or_default();
                let mark = match t.status {
                    TaskStatus::Done => "x",
                    TaskStatus::Todo => " ",
                };
                println!(
                    "[{}] {}  [{:?}] {}{} ({}h)",
                    mark,
                    t.id,
                    t.priority,
                    t.title,
                    due,
                    t.estimated_hours.unwrap_or(1.0)
                );
            }
        }

        Command::Done { id } => {
            set_status(&snapshot_path, &id, TaskStatus::Done)?;
        }

        Command::Reopen { id } => {
            set_status(&snapshot_path, &id, TaskStatus::Todo)?;
        }

        Command::Rm { id } => {
            let mut snapshot = store::load_snapshot(&snapshot_path)?;
            let removed = store::remove_task(&mut snapshot, &id)?;
            store::save_snapshot(&snapshot_path, &snapshot)?;
            println!("Removed {}: {}", removed.id, removed.title);
        }

        Command::Classify { title, desc, due } => {
            let cfg = config::load_config()?;
            let now = to_local(Utc::now(), &cfg.schedule.timezone)?;
            let due = due.as_deref().map(parse_due_date).transpose()?;

            let c = classify(&title, desc.as_deref().unwrap_or(""), due, now.date());
            println!(
                "priority={:?} estimated_hours={} confidence={:.2}",
                c.priority, c.estimated_hours, c.confidence
            );
        }

        Command::Plan(args) => {
            plan_cmd::run(args, &snapshot_path)?;
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn set_status(snapshot_path: &std::path::Path, id: &str, status: TaskStatus) -> Result<()> {
    let mut snapshot = store::load_snapshot(snapshot_path)?;
    let task = store::find_task_mut(&mut snapshot, id)?;
    task.status = status;
    let title = task.title.clone();
    store::save_snapshot(snapshot_path, &snapshot)?;
    println!("{}: {} -> {:?}", id, title, status);
    Ok(())
}
