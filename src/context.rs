//! Project and state directory resolution for taskroute.
//!
//! Hook invocations carry the project directory in their payload; CLI
//! commands fall back to the current working directory. All state (config,
//! agent registry, background tasks, events, Codex logs) lives under
//! `{project}/.taskroute/`.

use crate::error::{Result, RouteError};
use std::env;
use std::path::{Path, PathBuf};

/// State directory name relative to the project directory.
pub const STATE_DIR_NAME: &str = ".taskroute";

/// Resolved paths for one taskroute invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// Project directory the hook fired in.
    pub project_dir: PathBuf,

    /// State directory (default: `{project_dir}/.taskroute/`).
    pub state_dir: PathBuf,
}

impl RouteContext {
    /// Resolve the context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            RouteError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the context from a specific project directory.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn resolve_from<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let project_dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            env::current_dir()
                .map_err(|e| {
                    RouteError::UserError(format!(
                        "failed to get current working directory: {}",
                        e
                    ))
                })?
                .join(dir)
        };

        if !project_dir.is_dir() {
            return Err(RouteError::UserError(format!(
                "project directory '{}' does not exist",
                project_dir.display()
            )));
        }

        let state_dir = project_dir.join(STATE_DIR_NAME);
        Ok(Self {
            project_dir,
            state_dir,
        })
    }

    /// Resolve from an optional hook-supplied directory, else the cwd.
    pub fn resolve_for(directory: Option<&str>) -> Result<Self> {
        match directory {
            Some(dir) if !dir.trim().is_empty() => Self::resolve_from(dir),
            _ => Self::resolve(),
        }
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.state_dir.join("config.yaml")
    }

    /// Get the path to the agent registry.
    pub fn agents_config_path(&self) -> PathBuf {
        self.state_dir.join("agents.yaml")
    }

    /// Get the path to the background task state file.
    pub fn tasks_path(&self) -> PathBuf {
        self.state_dir.join("background-tasks.json")
    }

    /// Get the path to the events directory.
    pub fn events_dir(&self) -> PathBuf {
        self.state_dir.join("events")
    }

    /// Get the path to the main events log file.
    pub fn events_file(&self) -> PathBuf {
        self.events_dir().join("events.ndjson")
    }

    /// Get the directory holding Codex run logs.
    pub fn engine_logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs").join("codex")
    }
}
