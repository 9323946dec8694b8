//! Configuration section types and their defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Settings for launching the Codex CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodexSettings {
    /// Command line used to run Codex. Parsed with shell-words; the model
    /// flag and a trailing `-` (prompt on stdin) are appended.
    pub command: String,

    /// Flag that introduces the model argument.
    pub model_flag: String,

    /// Maximum execution time before the process is killed.
    pub timeout_seconds: u64,

    /// Environment variables set for the Codex process.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub environment: HashMap<String, String>,

    /// Model name translations applied before launching, e.g. `opus: o3`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub model_aliases: BTreeMap<String, String>,

    /// Prepend the agent's registry prompt to the task prompt.
    pub include_agent_prompt: bool,
}

impl Default for CodexSettings {
    fn default() -> Self {
        Self {
            command: default_codex_command(),
            model_flag: default_model_flag(),
            timeout_seconds: default_codex_timeout_seconds(),
            environment: HashMap::new(),
            model_aliases: BTreeMap::new(),
            include_agent_prompt: default_true(),
        }
    }
}

impl CodexSettings {
    /// Translate a model through `model_aliases`.
    pub fn map_model<'a>(&'a self, model: &'a str) -> &'a str {
        self.model_aliases
            .get(model)
            .map(String::as_str)
            .unwrap_or(model)
    }
}

/// Settings for the background task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Whether default-path invocations are recorded at all.
    pub enabled: bool,

    /// Maximum number of records kept; finished tasks are dropped first.
    pub max_tasks: usize,

    /// Minutes after which a running task is reported as stale.
    pub stale_minutes: u32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_tasks: default_max_tasks(),
            stale_minutes: default_stale_minutes(),
        }
    }
}

/// Settings for the audit event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Whether routing outcomes are appended to `events.ndjson`.
    pub enabled: bool,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

pub(crate) fn default_codex_command() -> String {
    "codex exec --skip-git-repo-check".to_string()
}
pub(crate) fn default_model_flag() -> String {
    "--model".to_string()
}
pub(crate) fn default_codex_timeout_seconds() -> u64 {
    300
}
pub(crate) fn default_max_tasks() -> usize {
    20
}
pub(crate) fn default_stale_minutes() -> u32 {
    30
}
pub(crate) fn default_true() -> bool {
    true
}
