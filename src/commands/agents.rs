//! Implementation of the `taskroute agents` commands.
//!
//! This module provides:
//! - `agents list` - List registry entries with their engine and model
//! - `agents route` - Dry-run the route classifier for one identifier

use crate::agent::{AgentRegistry, AgentsConfig, Route, classify_route, normalize_agent_id, resolve_model};
use crate::cli::AgentsRouteArgs;
use crate::context::RouteContext;
use crate::error::Result;

/// Execute the `taskroute agents list` command.
pub fn cmd_agents_list() -> Result<()> {
    let ctx = RouteContext::resolve()?;
    let registry = AgentsConfig::load_or_empty(ctx.agents_config_path())?;

    if registry.agents.is_empty() {
        println!(
            "No agents configured. Add agents to '{}' or run `taskroute init`.",
            ctx.agents_config_path().display()
        );
        return Ok(());
    }

    println!("Configured agents ({}):", registry.agents.len());
    println!();
    for (id, agent) in registry.iter() {
        let engine = if agent.runs_on_codex() { "codex" } else { "default" };
        let model = resolve_model(None, Some(agent)).unwrap_or_else(|| "-".to_string());
        println!("  {:24} {:8} {}", id, engine, model);
        if !agent.description.is_empty() {
            println!("    {}", agent.description);
        }
    }

    Ok(())
}

/// Execute the `taskroute agents route` command.
pub fn cmd_agents_route(args: AgentsRouteArgs) -> Result<()> {
    let ctx = RouteContext::resolve()?;
    let registry = AgentsConfig::load_or_empty(ctx.agents_config_path())?;

    println!("{}", describe_route(&registry, &args.agent, args.model.as_deref()));
    Ok(())
}

/// Human-readable classification of one identifier.
fn describe_route(registry: &dyn AgentRegistry, raw_id: &str, model: Option<&str>) -> String {
    let name = normalize_agent_id(raw_id);
    let definition = registry.lookup(name);

    let mut lines = vec![format!("Agent:  {}", name)];
    if definition.is_none() {
        lines.push("Entry:  not in registry".to_string());
    }

    match classify_route(name, definition, None, model) {
        Route::AlternateEngine(target) => {
            lines.push("Route:  Codex CLI".to_string());
            lines.push(format!(
                "Model:  {}",
                target.model.as_deref().unwrap_or("(engine default)")
            ));
        }
        Route::Default => {
            lines.push("Route:  default engine (tracked as background task)".to_string());
        }
    }

    lines.join("\n")
}
