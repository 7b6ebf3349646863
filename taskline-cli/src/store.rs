use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taskline_core::Task;

pub fn taskline_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskline"))
}

pub fn ensure_taskline_home() -> Result<PathBuf> {
    let dir = taskline_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_snapshot_path() -> Result<PathBuf> {
    Ok(ensure_taskline_home()?.join("tasks.json"))
}

/// The local working set: every task the CLI knows about, persisted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Next free id of the form `task-NNNN`.
pub fn next_task_id(snapshot: &Snapshot) -> String {
    let max = snapshot
        .tasks
        .iter()
        .filter_map(|t| t.id.strip_prefix("task-"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("task-{:04}", max + 1)
}

/// Append a task, rejecting duplicate titles (case-sensitive, like the
/// workspace it mirrors).
pub fn add_task(snapshot: &mut Snapshot, task: Task) -> Result<()> {
    if snapshot.tasks.iter().any(|t| t.title == task.title) {
        bail!("a task with this name already exists: {}", task.title);
    }
    snapshot.tasks.push(task);
    Ok(())
}

pub fn find_task_mut<'a>(snapshot: &'a mut Snapshot, id: &str) -> Result<&'a mut Task> {
    snapshot
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .with_context(|| format!("no task with id {id}"))
}

pub fn remove_task(snapshot: &mut Snapshot, id: &str) -> Result<Task> {
    let idx = snapshot
        .tasks
        .iter()
        .position(|t| t.id == id)
        .with_context(|| format!("no task with id {id}"))?;
    Ok(snapshot.tasks.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, title: &str) -> Task {
        let created = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Task::new(id, title, created)
    }

    #[test]
    fn test_next_task_id_skips_gaps() {
        let mut snap = Snapshot::default();
        assert_eq!(next_task_id(&snap), "task-0001");
        snap.tasks.push(task("task-0001", "a"));
        snap.tasks.push(task("task-0007", "b"));
        assert_eq!(next_task_id(&snap), "task-0008");
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let mut snap = Snapshot::default();
        add_task(&mut snap, task("task-0001", "write report")).unwrap();
        let err = add_task(&mut snap, task("task-0002", "write report")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_remove_missing_task_errors() {
        let mut snap = Snapshot::default();
        assert!(remove_task(&mut snap, "task-0001").is_err());
    }
}
