//! CLI argument parsing for taskroute.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Taskroute: sub-agent routing hook.
///
/// Runs as a tool-use hook. `Task` invocations for agents designated
/// `execution_type: codex` are executed by the Codex CLI and their output
/// replaces the tool call; all other invocations continue and are tracked
/// as background tasks.
#[derive(Parser, Debug)]
#[command(name = "taskroute")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for taskroute.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold `.taskroute/` in the current project.
    ///
    /// Writes a default config.yaml and an example agents.yaml if missing.
    Init,

    /// Process one hook event.
    ///
    /// Reads the event payload as JSON on stdin and prints the routing
    /// decision as JSON on stdout.
    Hook(HookArgs),

    /// Agent registry commands.
    Agents(AgentsCommand),

    /// Background task commands.
    Tasks(TasksCommand),

    /// Show recent audit events.
    Events(EventsArgs),
}

/// Arguments for the `hook` command.
#[derive(Parser, Debug)]
pub struct HookArgs {
    /// Event kind (e.g., pre-tool-use, PostToolUse).
    pub event: String,
}

/// Agent subcommands.
#[derive(Parser, Debug)]
pub struct AgentsCommand {
    #[command(subcommand)]
    pub action: AgentsAction,
}

/// Available agent actions.
#[derive(Subcommand, Debug)]
pub enum AgentsAction {
    /// List agents from agents.yaml with their engine and model.
    List,

    /// Show how an invocation of an agent would be routed.
    ///
    /// Classifies only; nothing is executed or recorded.
    Route(AgentsRouteArgs),
}

/// Arguments for the `agents route` command.
#[derive(Parser, Debug)]
pub struct AgentsRouteArgs {
    /// Agent identifier, optionally namespaced (e.g., `plugin:architect-codex`).
    pub agent: String,

    /// Model override as the invocation would carry it.
    #[arg(long)]
    pub model: Option<String>,
}

/// Background task subcommands.
#[derive(Parser, Debug)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub action: TasksAction,
}

/// Available background task actions.
#[derive(Subcommand, Debug)]
pub enum TasksAction {
    /// List background tasks.
    ///
    /// Shows running tasks by default; stale ones are flagged.
    List(TasksListArgs),

    /// Mark a background task finished.
    Complete(TasksCompleteArgs),

    /// Remove finished tasks from the store.
    Clear(TasksClearArgs),
}

/// Arguments for the `tasks list` command.
#[derive(Parser, Debug)]
pub struct TasksListArgs {
    /// Include completed and failed tasks.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `tasks complete` command.
#[derive(Parser, Debug)]
pub struct TasksCompleteArgs {
    /// Task ID (e.g., task-1760000000000-1a2b3c4d5).
    pub task_id: String,

    /// Record the task as failed instead of completed.
    #[arg(long)]
    pub failed: bool,
}

/// Arguments for the `tasks clear` command.
#[derive(Parser, Debug)]
pub struct TasksClearArgs {
    /// Remove running tasks too.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `events` command.
#[derive(Parser, Debug)]
pub struct EventsArgs {
    /// Number of most recent events to show (0 shows all).
    #[arg(long, default_value_t = 20)]
    pub tail: usize,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
