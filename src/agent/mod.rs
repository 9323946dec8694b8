//! Agent registry and routing classification.
//!
//! This module provides the decision half of the hook:
//!
//! - **Registry**: Agent definitions loaded from `agents.yaml`
//! - **Naming**: Namespace stripping for raw `subagent_type` identifiers
//! - **Routing**: Model resolution and the default/alternate-engine gate
//!
//! # Design Philosophy
//!
//! An agent is routed to the alternate engine only when its registry entry
//! explicitly declares `execution_type: codex`. Identifiers that merely look
//! like Codex agents (e.g. `fake-codex`) stay on the default path.

mod config;
mod naming;
mod routing;

// Re-export public API
pub use config::{AgentDefinition, AgentRegistry, AgentsConfig, ExecutionType, example_agents_yaml};
pub use naming::normalize_agent_id;
pub use routing::{Route, RouteTarget, classify_route, resolve_model};
