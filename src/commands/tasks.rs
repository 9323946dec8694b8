//! Implementation of the `taskroute tasks` commands.

use crate::cli::{TasksClearArgs, TasksCompleteArgs, TasksListArgs};
use crate::config::Config;
use crate::context::RouteContext;
use crate::error::{Result, RouteError};
use crate::events::{Event, EventAction, append_event};
use crate::tracker::{BackgroundTask, BackgroundTaskStore};
use chrono::Utc;
use serde_json::json;

fn open_store(ctx: &RouteContext) -> Result<(Config, BackgroundTaskStore)> {
    let config = Config::load_or_default(ctx.config_path())?;
    let store = BackgroundTaskStore::new(ctx.tasks_path(), config.tracker.clone());
    Ok((config, store))
}

/// Execute the `taskroute tasks list` command.
pub fn cmd_tasks_list(args: TasksListArgs) -> Result<()> {
    let ctx = RouteContext::resolve()?;
    let (config, store) = open_store(&ctx)?;

    let tasks: Vec<BackgroundTask> = store
        .list()?
        .into_iter()
        .filter(|t| args.all || !t.status.is_finished())
        .collect();

    if tasks.is_empty() {
        println!("No background tasks.");
        return Ok(());
    }

    let now = Utc::now();
    println!("Background tasks ({}):", tasks.len());
    println!();
    for task in &tasks {
        let age = now.signed_duration_since(task.started_at).num_minutes();
        let stale = if store.is_stale(task, now) { "  STALE" } else { "" };
        println!("  {}  [{}]{}", task.id, task.status, stale);
        println!("    Agent:    {}", task.agent_name);
        if !task.description.is_empty() {
            println!("    Desc:     {}", task.description);
        }
        println!("    Started:  {} ({} min ago)", task.started_at.format("%Y-%m-%d %H:%M:%S UTC"), age);
        if let Some(dir) = &task.directory {
            println!("    Dir:      {}", dir);
        }
    }

    let stale_count = tasks.iter().filter(|t| store.is_stale(t, now)).count();
    if stale_count > 0 {
        println!();
        println!(
            "Note: {} task(s) running longer than {} min. Use `taskroute tasks complete <id> --failed` to close them.",
            stale_count, config.tracker.stale_minutes
        );
    }

    Ok(())
}

/// Execute the `taskroute tasks complete` command.
pub fn cmd_tasks_complete(args: TasksCompleteArgs) -> Result<()> {
    let ctx = RouteContext::resolve()?;
    complete_task(&ctx, &args.task_id, args.failed)?;

    let status = if args.failed { "failed" } else { "completed" };
    println!("Marked {} as {}.", args.task_id, status);
    Ok(())
}

fn complete_task(ctx: &RouteContext, task_id: &str, failed: bool) -> Result<()> {
    let (config, store) = open_store(ctx)?;

    if !store.complete(task_id, failed)? {
        return Err(RouteError::UserError(format!(
            "background task '{}' not found.\n\
             Run `taskroute tasks list --all` to see tracked tasks.",
            task_id
        )));
    }

    if config.events.enabled {
        let status = if failed { "failed" } else { "completed" };
        let event = Event::new(EventAction::TaskCompleted).with_details(json!({
            "task_id": task_id,
            "status": status,
            "manual": true,
        }));
        if let Err(e) = append_event(ctx, &event) {
            eprintln!("Warning: failed to log task_completed event: {}", e);
        }
    }

    Ok(())
}

/// Execute the `taskroute tasks clear` command.
pub fn cmd_tasks_clear(args: TasksClearArgs) -> Result<()> {
    let ctx = RouteContext::resolve()?;
    let (_, store) = open_store(&ctx)?;

    let removed = if args.all {
        store.reset()?
    } else {
        store.clear_finished()?
    };

    println!("Removed {} background task(s).", removed);
    Ok(())
}
