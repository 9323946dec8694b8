//! Bridge from a classified route to the alternate engine.

use super::{AlternateEngine, EngineOutcome, EngineUnavailable};
use crate::agent::RouteTarget;
use crate::hook::RoutingDecision;
use tracing::{info, warn};

/// Display name of the alternate engine.
pub const ENGINE_NAME: &str = "Codex CLI";

/// Reason attached to decisions for failed engine runs.
pub const ENGINE_ERROR_REASON: &str = "Codex CLI error";

/// Run a routed invocation on the engine and translate the outcome.
///
/// Both completed and failed runs replace normal execution
/// (`continue: false`). [`EngineUnavailable`] is returned unchanged.
pub fn route_to_engine(
    engine: &dyn AlternateEngine,
    target: &RouteTarget,
) -> Result<RoutingDecision, EngineUnavailable> {
    info!(
        agent = %target.agent_name,
        model = target.model.as_deref().unwrap_or("<engine default>"),
        "routing agent to {}",
        ENGINE_NAME
    );

    let outcome = engine.execute(&target.agent_name, &target.prompt, target.model.as_deref())?;

    let decision = match outcome {
        EngineOutcome::Completed { output } => RoutingDecision::substitute(
            output,
            format!("Routed to {} (agent: {})", ENGINE_NAME, target.agent_name),
        ),
        EngineOutcome::Failed { output, error } => {
            warn!(agent = %target.agent_name, %error, "{} run failed", ENGINE_NAME);
            RoutingDecision::substitute(failure_message(&error, &output), ENGINE_ERROR_REASON)
        }
    };

    Ok(decision)
}

fn failure_message(error: &str, output: &str) -> String {
    let mut message = format!("{} execution failed: {}", ENGINE_NAME, error);
    let output = output.trim();
    if !output.is_empty() {
        message.push_str("\n\nPartial output:\n");
        message.push_str(output);
    }
    message
}
