//! Append-only audit log of routing outcomes.
//!
//! Events are stored in NDJSON format (one JSON object per line) in
//! `.taskroute/events/events.ndjson`.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (`engine_routed`, `task_registered`, ...)
//! - `actor`: `user@HOST` of the hook process
//! - `agent`: bare agent name, when the event concerns one
//! - `details`: freeform object with action-specific fields
//!
//! Writing an event never changes a routing decision; callers log and
//! ignore append failures.

use crate::context::RouteContext;
use crate::error::{Result, RouteError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A routed agent completed on the alternate engine.
    EngineRouted,
    /// A routed agent ran but failed.
    EngineFailed,
    /// The alternate engine could not be invoked.
    EngineUnavailable,
    /// A default-path invocation was recorded as a background task.
    TaskRegistered,
    /// A background task was marked finished.
    TaskCompleted,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::EngineRouted => write!(f, "engine_routed"),
            EventAction::EngineFailed => write!(f, "engine_failed"),
            EventAction::EngineUnavailable => write!(f, "engine_unavailable"),
            EventAction::TaskRegistered => write!(f, "task_registered"),
            EventAction::TaskCompleted => write!(f, "task_completed"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// When the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor (`user@HOST`).
    pub actor: String,

    /// Bare agent name for agent-specific events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Freeform details.
    pub details: Value,
}

impl Event {
    /// Create an event stamped now with the current actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            agent: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the agent for this event.
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            RouteError::StateError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the events log, creating the file if needed.
pub fn append_event(ctx: &RouteContext, event: &Event) -> Result<()> {
    let events_file = ctx.events_file();
    let json_line = event.to_ndjson_line()?;

    let events_dir = ctx.events_dir();
    if !events_dir.exists() {
        fs::create_dir_all(&events_dir).map_err(|e| {
            RouteError::StateError(format!(
                "failed to create events directory '{}': {}",
                events_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            RouteError::StateError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        RouteError::StateError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read all events from the log. A missing log is empty.
pub fn read_events(ctx: &RouteContext) -> Result<Vec<Event>> {
    let events_file = ctx.events_file();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&events_file).map_err(|e| {
        RouteError::StateError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                RouteError::StateError(format!(
                    "malformed event in '{}': {}",
                    events_file.display(),
                    e
                ))
            })
        })
        .collect()
}
