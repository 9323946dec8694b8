//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the taskroute hook.
///
/// This struct represents the contents of `.taskroute/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How the Codex CLI is launched for routed agents.
    pub codex: CodexSettings,

    /// Background task bookkeeping for default-path invocations.
    pub tracker: TrackerSettings,

    /// Append-only audit log of routing outcomes.
    pub events: EventSettings,
}
