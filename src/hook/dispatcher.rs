//! Hook dispatcher: the single entry point of the routing core.

use super::{HookEvent, HookInput, RoutingDecision};
use crate::agent::{AgentRegistry, Route, classify_route, normalize_agent_id};
use crate::engine::{AlternateEngine, EngineUnavailable, route_to_engine};
use crate::tracker::{BackgroundTaskRegistrar, generate_task_id};
use tracing::{debug, warn};

/// Collaborators the dispatcher consults for one invocation.
pub struct HookDeps<'a> {
    /// Agent definitions by bare identifier.
    pub registry: &'a dyn AgentRegistry,
    /// Engine for agents designated to run out of process.
    pub engine: &'a dyn AlternateEngine,
    /// Tracker informed about default-path invocations.
    pub registrar: &'a dyn BackgroundTaskRegistrar,
}

/// Process one hook event and decide whether normal execution continues.
///
/// Only `pre-tool-use` events for the `Task` tool do any work. Routed agents
/// run on the alternate engine and its result replaces the tool call; all
/// other agents are registered as background tasks and continue.
///
/// # Errors
///
/// Returns [`EngineUnavailable`] when a routed agent's engine cannot be
/// invoked. No decision is produced in that case.
pub fn process_hook(
    event: &HookEvent,
    input: &HookInput,
    deps: &HookDeps<'_>,
) -> Result<RoutingDecision, EngineUnavailable> {
    if *event != HookEvent::PreToolUse || !input.is_routable_tool() {
        return Ok(RoutingDecision::proceed());
    }

    let Some(task) = input.task_input() else {
        warn!("Task invocation without a string subagent_type; passing through");
        return Ok(RoutingDecision::proceed());
    };

    let agent_name = normalize_agent_id(&task.subagent_type);
    let definition = deps.registry.lookup(agent_name);

    let route = classify_route(
        agent_name,
        definition,
        task.prompt.as_deref(),
        task.model.as_deref(),
    );
    debug!(agent = agent_name, known = definition.is_some(), ?route, "classified invocation");

    match route {
        Route::AlternateEngine(target) => route_to_engine(deps.engine, &target),
        Route::Default => {
            let task_id = generate_task_id();
            let description = task.description.as_deref().unwrap_or_default();
            if let Err(e) = deps.registrar.register(
                &task_id,
                description,
                agent_name,
                input.directory.as_deref(),
            ) {
                warn!(task_id = %task_id, agent = agent_name, error = %e, "failed to record background task");
            }
            Ok(RoutingDecision::proceed())
        }
    }
}
