//! Alternate execution engine.
//!
//! This module provides:
//!
//! - The [`AlternateEngine`] call contract and its outcome types
//! - The bridge that turns an engine outcome into a [`RoutingDecision`]
//! - [`CodexEngine`], which runs the Codex CLI as a subprocess
//!
//! An engine call ends in one of three ways. `Completed` and `Failed` are
//! data and become routing decisions. [`EngineUnavailable`] means the engine
//! could not be invoked at all; it travels as an error so the session owner
//! decides whether to abort or degrade.
//!
//! [`RoutingDecision`]: crate::hook::RoutingDecision

mod bridge;
mod codex;

pub use bridge::{ENGINE_ERROR_REASON, route_to_engine};
pub use codex::CodexEngine;

use thiserror::Error;

/// Result of an engine run that actually took place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// The agent finished and produced output.
    Completed {
        /// Agent output to substitute for the tool result.
        output: String,
    },
    /// The agent declined, timed out or errored during its own run.
    Failed {
        /// Partial output, possibly empty.
        output: String,
        /// Failure detail shown to the caller.
        error: String,
    },
}

/// The engine process could not be started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineUnavailable {
    /// Human-readable cause.
    pub message: String,
}

impl EngineUnavailable {
    /// Create an unavailability error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Call contract of the alternate execution engine.
pub trait AlternateEngine {
    /// Run `agent_name` with `prompt` on the given model and wait for it.
    fn execute(
        &self,
        agent_name: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<EngineOutcome, EngineUnavailable>;
}
