//! Route classification for sub-agent invocations.
//!
//! # Resolution Order
//!
//! Model:
//! 1. Model override on the invocation
//! 2. `model` declared by the registry entry
//! 3. `default_model` of the registry entry
//! 4. None
//!
//! Route:
//! 1. No registry entry: default engine
//! 2. Entry with `execution_type: codex`: alternate engine
//! 3. Anything else: default engine

use super::config::AgentDefinition;

/// Arguments carried forward to the alternate engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    /// Bare agent name (namespace already stripped).
    pub agent_name: String,
    /// Task prompt, empty when the invocation omitted it.
    pub prompt: String,
    /// Resolved model, if any source named one.
    pub model: Option<String>,
}

/// Execution path for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Let the default engine run the task.
    Default,
    /// Replace execution with the alternate engine.
    AlternateEngine(RouteTarget),
}

/// Resolve the model for an invocation.
///
/// Absent and blank values are skipped. Other values pass through verbatim.
pub fn resolve_model(
    override_model: Option<&str>,
    definition: Option<&AgentDefinition>,
) -> Option<String> {
    let declared = definition.and_then(|d| d.model.as_deref());
    let fallback = definition.and_then(|d| d.default_model.as_deref());

    [override_model, declared, fallback]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// Decide the execution path for a normalized agent name.
///
/// The registry entry's execution-engine designation is the only signal;
/// the name, prompt and tool list never influence the outcome.
pub fn classify_route(
    agent_name: &str,
    definition: Option<&AgentDefinition>,
    prompt: Option<&str>,
    override_model: Option<&str>,
) -> Route {
    let Some(definition) = definition else {
        return Route::Default;
    };

    if !definition.runs_on_codex() {
        return Route::Default;
    }

    Route::AlternateEngine(RouteTarget {
        agent_name: agent_name.to_string(),
        prompt: prompt.unwrap_or_default().to_string(),
        model: resolve_model(override_model, Some(definition)),
    })
}
