//! Background task tracking for default-path invocations.
//!
//! Every `Task` invocation that is not routed to the alternate engine is
//! recorded so the caller can observe long-running sub-agent work. The
//! dispatcher only talks to the [`BackgroundTaskRegistrar`] trait;
//! [`BackgroundTaskStore`] is the JSON-file implementation.

mod store;

pub use store::BackgroundTaskStore;

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Records the start of a default-path invocation.
pub trait BackgroundTaskRegistrar {
    /// Record a task start. Failures never change the routing decision.
    fn register(
        &self,
        task_id: &str,
        description: &str,
        agent_name: &str,
        directory: Option<&str>,
    ) -> Result<()>;
}

/// Generate a unique task identifier: `task-<unix-millis>-<9 hex chars>`.
pub fn generate_task_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("task-{}-{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// Lifecycle state of a background task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still executing on the default engine.
    Running,
    /// Finished normally.
    Completed,
    /// Finished with an error.
    Failed,
}

impl TaskStatus {
    /// Whether the task has finished, successfully or not.
    pub fn is_finished(self) -> bool {
        !matches!(self, TaskStatus::Running)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A tracked sub-agent invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundTask {
    /// Unique identifier from [`generate_task_id`].
    pub id: String,

    /// Invocation description, possibly empty.
    pub description: String,

    /// Bare agent name.
    pub agent_name: String,

    /// Project directory the invocation came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    /// Current status.
    pub status: TaskStatus,

    /// When the invocation was registered.
    pub started_at: DateTime<Utc>,

    /// When the task was marked finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl BackgroundTask {
    /// Create a running task started now.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        agent_name: impl Into<String>,
        directory: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            agent_name: agent_name.into(),
            directory: directory.map(str::to_string),
            status: TaskStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Mark the task finished now.
    pub fn finish(&mut self, failed: bool) {
        self.status = if failed {
            TaskStatus::Failed
        } else {
            TaskStatus::Completed
        };
        self.completed_at = Some(Utc::now());
    }
}
