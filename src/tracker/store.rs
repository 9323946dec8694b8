//! JSON-file background task store.
//!
//! State lives in `.taskroute/background-tasks.json`:
//!
//! ```json
//! { "tasks": [ { "id": "task-1760000000000-1a2b3c4d5", "status": "running", ... } ] }
//! ```
//!
//! Every mutation is load, modify, atomic write. When the record count
//! exceeds `max_tasks`, the oldest finished tasks are dropped first, then
//! the oldest running ones.

use super::{BackgroundTask, BackgroundTaskRegistrar};
use crate::config::TrackerSettings;
use crate::error::{Result, RouteError};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialized store contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TaskState {
    #[serde(default)]
    tasks: Vec<BackgroundTask>,
}

/// Background task store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct BackgroundTaskStore {
    path: PathBuf,
    settings: TrackerSettings,
}

impl BackgroundTaskStore {
    /// Create a store for the given state file.
    pub fn new(path: impl Into<PathBuf>, settings: TrackerSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether registrations are recorded.
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// All tracked tasks, oldest first.
    pub fn list(&self) -> Result<Vec<BackgroundTask>> {
        Ok(self.load()?.tasks)
    }

    /// Add a task and prune the store to `max_tasks`.
    pub fn add(&self, task: BackgroundTask) -> Result<()> {
        let mut state = self.load()?;
        state.tasks.push(task);
        prune(&mut state.tasks, self.settings.max_tasks);
        self.save(&state)
    }

    /// Mark a task finished by id.
    ///
    /// Returns `false` if no task has that id.
    pub fn complete(&self, task_id: &str, failed: bool) -> Result<bool> {
        let mut state = self.load()?;
        let Some(task) = state.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(false);
        };
        task.finish(failed);
        self.save(&state)?;
        Ok(true)
    }

    /// Mark the oldest running task for this agent and description finished.
    ///
    /// Returns the id of the completed task, if one matched.
    pub fn complete_matching(
        &self,
        agent_name: &str,
        description: &str,
        failed: bool,
    ) -> Result<Option<String>> {
        let mut state = self.load()?;
        let Some(task) = state.tasks.iter_mut().find(|t| {
            !t.status.is_finished() && t.agent_name == agent_name && t.description == description
        }) else {
            return Ok(None);
        };
        task.finish(failed);
        let id = task.id.clone();
        self.save(&state)?;
        Ok(Some(id))
    }

    /// Remove all finished tasks. Returns how many were removed.
    pub fn clear_finished(&self) -> Result<usize> {
        let mut state = self.load()?;
        let before = state.tasks.len();
        state.tasks.retain(|t| !t.status.is_finished());
        let removed = before - state.tasks.len();
        if removed > 0 {
            self.save(&state)?;
        }
        Ok(removed)
    }

    /// Whether a running task has exceeded `stale_minutes`.
    pub fn is_stale(&self, task: &BackgroundTask, now: DateTime<Utc>) -> bool {
        !task.status.is_finished()
            && now.signed_duration_since(task.started_at)
                > Duration::minutes(i64::from(self.settings.stale_minutes))
    }

    fn load(&self) -> Result<TaskState> {
        if !self.path.exists() {
            return Ok(TaskState::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            RouteError::StateError(format!(
                "failed to read background tasks '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(TaskState::default());
        }

        serde_json::from_str(&content).map_err(|e| {
            RouteError::StateError(format!(
                "failed to parse background tasks '{}': {}\n\
                 Fix: run `taskroute tasks clear --all` or delete the file.",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, state: &TaskState) -> Result<()> {
        let json = serde_json::to_string_pretty(state).map_err(|e| {
            RouteError::StateError(format!("failed to serialize background tasks: {}", e))
        })?;
        atomic_write_file(&self.path, &json)
    }

    /// Delete every record, running or not.
    pub fn reset(&self) -> Result<usize> {
        let state = self.load()?;
        let removed = state.tasks.len();
        self.save(&TaskState::default())?;
        Ok(removed)
    }
}

impl BackgroundTaskRegistrar for BackgroundTaskStore {
    fn register(
        &self,
        task_id: &str,
        description: &str,
        agent_name: &str,
        directory: Option<&str>,
    ) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        debug!(task_id, agent = agent_name, "registering background task");
        self.add(BackgroundTask::new(task_id, description, agent_name, directory))
    }
}

/// Drop records until at most `max` remain: finished tasks first, oldest first.
fn prune(tasks: &mut Vec<BackgroundTask>, max: usize) {
    while tasks.len() > max {
        let victim = tasks
            .iter()
            .position(|t| t.status.is_finished())
            .unwrap_or(0);
        tasks.remove(victim);
    }
}
