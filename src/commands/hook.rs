//! Implementation of the `taskroute hook` command.
//!
//! Wires the routing core to its on-disk collaborators:
//! - `agents.yaml` as the agent registry
//! - [`CodexEngine`] as the alternate engine
//! - [`BackgroundTaskStore`] as the background task registrar
//!
//! `pre-tool-use` events go through [`process_hook`]. `post-tool-use`
//! events for the `Task` tool close the matching background task. Every
//! other event continues untouched.

use crate::agent::{AgentsConfig, normalize_agent_id};
use crate::cli::HookArgs;
use crate::config::Config;
use crate::context::RouteContext;
use crate::engine::{CodexEngine, ENGINE_ERROR_REASON};
use crate::error::{Result, RouteError};
use crate::events::{Event, EventAction, append_event};
use crate::hook::{HookDeps, HookEvent, HookInput, RoutingDecision, process_hook};
use crate::tracker::{BackgroundTaskRegistrar, BackgroundTaskStore};
use serde_json::json;
use std::io::Read;
use tracing::{info, warn};

/// Execute the `taskroute hook <event>` command.
///
/// Reads the payload from stdin and prints the decision JSON on stdout.
pub fn cmd_hook(args: HookArgs) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .map_err(|e| RouteError::UserError(format!("failed to read hook payload from stdin: {}", e)))?;

    let input = parse_payload(&raw)?;
    let event = HookEvent::parse(&args.event);
    let decision = run_hook(&event, &input)?;

    let json = decision.to_json().map_err(|e| {
        RouteError::UserError(format!("failed to serialize routing decision: {}", e))
    })?;
    println!("{}", json);
    Ok(())
}

/// Parse the stdin payload. An empty payload is an empty input.
fn parse_payload(raw: &str) -> Result<HookInput> {
    if raw.trim().is_empty() {
        return Ok(HookInput::default());
    }

    serde_json::from_str(raw).map_err(|e| {
        RouteError::UserError(format!(
            "invalid hook payload: {}\n\
             Expected a JSON object such as \
             {{\"toolName\": \"Task\", \"toolInput\": {{\"subagent_type\": \"...\"}}}}",
            e
        ))
    })
}

/// Whether an event can touch project state. Everything else continues
/// without reading the project directory.
fn is_tracked(event: &HookEvent, input: &HookInput) -> bool {
    matches!(event, HookEvent::PreToolUse | HookEvent::PostToolUse) && input.is_routable_tool()
}

/// Resolve the project from the payload and process one event.
fn run_hook(event: &HookEvent, input: &HookInput) -> Result<RoutingDecision> {
    if !is_tracked(event, input) {
        return Ok(RoutingDecision::proceed());
    }

    let ctx = RouteContext::resolve_for(input.directory.as_deref())?;
    handle_hook(&ctx, event, input)
}

/// Process one event against the project's state directory.
pub(crate) fn handle_hook(
    ctx: &RouteContext,
    event: &HookEvent,
    input: &HookInput,
) -> Result<RoutingDecision> {
    if !is_tracked(event, input) {
        return Ok(RoutingDecision::proceed());
    }

    let config = Config::load_or_default(ctx.config_path())?;
    let audit = Audit {
        ctx,
        enabled: config.events.enabled,
    };
    let store = BackgroundTaskStore::new(ctx.tasks_path(), config.tracker.clone());

    if *event == HookEvent::PostToolUse {
        complete_background_task(&store, &audit, input);
        return Ok(RoutingDecision::proceed());
    }

    let registry = AgentsConfig::load_or_empty(ctx.agents_config_path())?;
    let engine = CodexEngine::new(
        config.codex.clone(),
        &ctx.project_dir,
        ctx.engine_logs_dir(),
    )
    .with_agent_prompts(registry.agent_prompts());
    let registrar = AuditedRegistrar {
        store: &store,
        audit: &audit,
    };

    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let agent = input
        .task_input()
        .map(|t| normalize_agent_id(&t.subagent_type).to_string());

    match process_hook(event, input, &deps) {
        Ok(decision) => {
            if !decision.continue_ {
                let failed = decision.reason.as_deref() == Some(ENGINE_ERROR_REASON);
                let action = if failed {
                    EventAction::EngineFailed
                } else {
                    EventAction::EngineRouted
                };
                info!(agent = ?agent, failed, "agent executed on Codex CLI");
                audit.record(Event::new(action).with_agent(agent.unwrap_or_default()).with_details(
                    json!({
                        "reason": decision.reason,
                        "output_bytes": decision.message.as_deref().map_or(0, str::len),
                    }),
                ));
            }
            Ok(decision)
        }
        Err(e) => {
            audit.record(
                Event::new(EventAction::EngineUnavailable)
                    .with_agent(agent.unwrap_or_default())
                    .with_details(json!({ "error": e.message })),
            );
            Err(e.into())
        }
    }
}

/// Close the oldest running task matching a finished `Task` invocation.
fn complete_background_task(store: &BackgroundTaskStore, audit: &Audit<'_>, input: &HookInput) {
    let Some(task) = input.task_input() else {
        return;
    };

    let agent = normalize_agent_id(&task.subagent_type);
    let description = task.description.as_deref().unwrap_or_default();

    match store.complete_matching(agent, description, false) {
        Ok(Some(task_id)) => audit.record(
            Event::new(EventAction::TaskCompleted)
                .with_agent(agent)
                .with_details(json!({ "task_id": task_id, "status": "completed" })),
        ),
        Ok(None) => {}
        Err(e) => warn!(
            agent,
            path = %store.path().display(),
            error = %e,
            "failed to complete background task"
        ),
    }
}

/// Best-effort audit log writer.
struct Audit<'a> {
    ctx: &'a RouteContext,
    enabled: bool,
}

impl Audit<'_> {
    fn record(&self, event: Event) {
        if !self.enabled {
            return;
        }
        if let Err(e) = append_event(self.ctx, &event) {
            warn!(action = %event.action, error = %e, "failed to append audit event");
        }
    }
}

/// Registrar that audits successful registrations.
struct AuditedRegistrar<'a> {
    store: &'a BackgroundTaskStore,
    audit: &'a Audit<'a>,
}

impl BackgroundTaskRegistrar for AuditedRegistrar<'_> {
    fn register(
        &self,
        task_id: &str,
        description: &str,
        agent_name: &str,
        directory: Option<&str>,
    ) -> Result<()> {
        if !self.store.is_enabled() {
            return Ok(());
        }
        self.store
            .register(task_id, description, agent_name, directory)?;
        self.audit.record(
            Event::new(EventAction::TaskRegistered)
                .with_agent(agent_name)
                .with_details(json!({ "task_id": task_id, "description": description })),
        );
        Ok(())
    }
}
