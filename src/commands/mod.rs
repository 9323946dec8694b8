//! Command implementations for taskroute.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod agents;
mod events;
mod hook;
mod init;
mod tasks;

use crate::cli::{AgentsAction, AgentsCommand, Command, TasksAction, TasksCommand};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(),
        Command::Hook(args) => hook::cmd_hook(args),
        Command::Agents(agents_cmd) => dispatch_agents(agents_cmd),
        Command::Tasks(tasks_cmd) => dispatch_tasks(tasks_cmd),
        Command::Events(args) => events::cmd_events(args),
    }
}

fn dispatch_agents(agents_cmd: AgentsCommand) -> Result<()> {
    match agents_cmd.action {
        AgentsAction::List => agents::cmd_agents_list(),
        AgentsAction::Route(args) => agents::cmd_agents_route(args),
    }
}

fn dispatch_tasks(tasks_cmd: TasksCommand) -> Result<()> {
    match tasks_cmd.action {
        TasksAction::List(args) => tasks::cmd_tasks_list(args),
        TasksAction::Complete(args) => tasks::cmd_tasks_complete(args),
        TasksAction::Clear(args) => tasks::cmd_tasks_clear(args),
    }
}
