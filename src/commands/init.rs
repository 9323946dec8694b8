//! Implementation of the `taskroute init` command.
//!
//! # What `taskroute init` does
//!
//! 1. Creates `.taskroute/` in the current directory
//! 2. Creates `config.yaml` with every default spelled out (if missing)
//! 3. Creates an example `agents.yaml` (if missing)
//! 4. Creates `.gitignore` so run logs and task state stay local
//!
//! The command is idempotent: existing files are never overwritten.

use crate::agent::example_agents_yaml;
use crate::config::Config;
use crate::context::RouteContext;
use crate::error::{Result, RouteError};
use crate::fs::atomic_write_file;
use std::fs;
use std::path::Path;

const GITIGNORE: &str = "# Local taskroute state\nlogs/\nevents/\nbackground-tasks.json\n";

/// Execute the `taskroute init` command.
pub fn cmd_init() -> Result<()> {
    let ctx = RouteContext::resolve()?;
    let created = scaffold(&ctx)?;

    println!("Initialized taskroute in {}", ctx.state_dir.display());
    println!();
    if created.is_empty() {
        println!("Nothing to do; all files already exist.");
    } else {
        println!("Created:");
        for name in &created {
            println!("  .taskroute/{}", name);
        }
    }
    println!();
    println!("Register the hook with your agent host, e.g.:");
    println!("  taskroute hook pre-tool-use");
    println!("  taskroute hook post-tool-use");

    Ok(())
}

/// Create missing state files. Returns the names of files written.
fn scaffold(ctx: &RouteContext) -> Result<Vec<&'static str>> {
    fs::create_dir_all(&ctx.state_dir).map_err(|e| {
        RouteError::StateError(format!(
            "failed to create '{}': {}",
            ctx.state_dir.display(),
            e
        ))
    })?;

    let config_yaml = format!(
        "# taskroute configuration. All keys are optional.\n{}",
        Config::default().to_yaml()?
    );

    let mut created = Vec::new();
    for (name, content) in [
        ("config.yaml", config_yaml.as_str()),
        ("agents.yaml", example_agents_yaml()),
        (".gitignore", GITIGNORE),
    ] {
        if write_if_missing(&ctx.state_dir.join(name), content)? {
            created.push(name);
        }
    }

    Ok(created)
}

fn write_if_missing(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write_file(path, content)?;
    Ok(true)
}
