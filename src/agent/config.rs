//! Agent registry schema.
//!
//! This module defines the `agents.yaml` file format, which declares the
//! sub-agents the hook knows about and which execution engine runs them.
//!
//! # File Format
//!
//! ```yaml
//! agents:
//!   architect-codex:
//!     description: "Architecture review through Codex"
//!     prompt: |
//!       You are a senior architect...
//!     tools: [Read, Grep]
//!     default_model: gpt-5-codex
//!     execution_type: codex
//!
//!   executor:
//!     description: "Implementation agent"
//!     prompt: "Implement the requested change."
//!     tools: [Read, Edit, Bash]
//!     model: sonnet
//! ```
//!
//! `defaultModel` and `executionType` are accepted as aliases so registries
//! exported from JavaScript tooling load unchanged.

use crate::error::{Result, RouteError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Valid agent identifiers. The `:` namespace separator is reserved for
/// invocation payloads and never appears in a registry key.
static AGENT_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid agent ID regex")
});

/// Read-only access to agent definitions by bare identifier.
pub trait AgentRegistry {
    /// Look up an agent definition. Absence is a valid outcome, not an error.
    fn lookup(&self, name: &str) -> Option<&AgentDefinition>;
}

/// Execution engine an agent is designated to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionType {
    /// The default in-process engine.
    Claude,
    /// The out-of-process Codex CLI.
    Codex,
}

/// Definition of a single agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Prompt template prepended to the task prompt when the agent runs.
    #[serde(default)]
    pub prompt: String,

    /// Tools the agent is allowed to use.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,

    /// Model used when neither the invocation nor `model` names one.
    #[serde(
        default,
        alias = "defaultModel",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_model: Option<String>,

    /// Declared model for this agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Execution engine designation. Only `codex` triggers routing.
    #[serde(
        default,
        alias = "executionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub execution_type: Option<ExecutionType>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl AgentDefinition {
    /// Whether this agent is designated for the Codex CLI.
    pub fn runs_on_codex(&self) -> bool {
        self.execution_type == Some(ExecutionType::Codex)
    }
}

/// The agent registry, loaded from `agents.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Agent definitions keyed by bare identifier.
    #[serde(default)]
    pub agents: BTreeMap<String, AgentDefinition>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl AgentRegistry for AgentsConfig {
    fn lookup(&self, name: &str) -> Option<&AgentDefinition> {
        self.agents.get(name)
    }
}

impl AgentsConfig {
    /// Load the registry from a YAML file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            RouteError::ConfigError(format!(
                "failed to read agent registry '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml(&content)?;
        Ok(Some(config))
    }

    /// Load the registry, treating a missing file as an empty registry.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    /// Parse the registry from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)
            .map_err(|e| RouteError::ConfigError(format!("failed to parse agents.yaml: {}", e)))?;

        let config: AgentsConfig = if value.is_null() {
            AgentsConfig::default()
        } else {
            serde_yaml::from_value(value).map_err(|e| {
                RouteError::ConfigError(format!("failed to parse agents.yaml: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize the registry to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RouteError::ConfigError(format!("failed to serialize agent registry: {}", e))
        })
    }

    /// Validate agent identifiers.
    pub fn validate(&self) -> Result<()> {
        for id in self.agents.keys() {
            if !AGENT_ID_REGEX.is_match(id) {
                return Err(RouteError::ConfigError(format!(
                    "agents.yaml validation failed: invalid agent identifier '{}'.\n\
                     Identifiers use letters, digits, '.', '_' and '-' and must not \
                     carry a 'namespace:' prefix.",
                    id
                )));
            }
        }
        Ok(())
    }

    /// Iterate over all agents.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentDefinition)> {
        self.agents.iter().map(|(id, a)| (id.as_str(), a))
    }

    /// Prompt templates of all agents that declare one.
    pub fn agent_prompts(&self) -> BTreeMap<String, String> {
        self.agents
            .iter()
            .filter(|(_, a)| !a.prompt.trim().is_empty())
            .map(|(id, a)| (id.clone(), a.prompt.clone()))
            .collect()
    }
}

/// Example registry written by `taskroute init`.
pub fn example_agents_yaml() -> &'static str {
    r#"# Agent registry for taskroute.
#
# Agents with `execution_type: codex` are executed through the Codex CLI
# instead of the default engine. Everything else passes through and is
# tracked as a background task.
agents:
  architect-codex:
    description: "Architecture analysis through the Codex CLI"
    prompt: |
      You are a software architect. Analyze the request and answer with a
      concise, evidence-backed assessment.
    tools: [Read, Grep, Glob]
    default_model: gpt-5-codex
    execution_type: codex

  executor:
    description: "Implementation agent on the default engine"
    prompt: "Implement the requested change."
    tools: [Read, Edit, Bash]
    model: sonnet
"#
}
