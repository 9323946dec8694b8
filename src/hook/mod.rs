//! Hook payloads, routing decisions and the dispatcher entry point.
//!
//! The hook host fires an event per tool call. Only `pre-tool-use` events
//! for the `Task` tool are inspected; everything else continues untouched.

mod dispatcher;

#[cfg(test)]
mod tests;

pub use dispatcher::{HookDeps, process_hook};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The one tool whose invocations are routed.
pub const ROUTABLE_TOOL: &str = "Task";

/// Hook event kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// Before a tool runs. The only kind that triggers routing.
    PreToolUse,
    /// After a tool has run.
    PostToolUse,
    /// A session started.
    SessionStart,
    /// The assistant finished responding.
    Stop,
    /// The user submitted a prompt.
    UserPromptSubmit,
    /// Any other event name, kept verbatim.
    Other(String),
}

impl HookEvent {
    /// Parse an event name. Accepts kebab-case (`pre-tool-use`) and the
    /// PascalCase names hook hosts send (`PreToolUse`).
    pub fn parse(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "pretooluse" => HookEvent::PreToolUse,
            "posttooluse" => HookEvent::PostToolUse,
            "sessionstart" => HookEvent::SessionStart,
            "stop" => HookEvent::Stop,
            "userpromptsubmit" => HookEvent::UserPromptSubmit,
            _ => HookEvent::Other(name.to_string()),
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookEvent::PreToolUse => write!(f, "pre-tool-use"),
            HookEvent::PostToolUse => write!(f, "post-tool-use"),
            HookEvent::SessionStart => write!(f, "session-start"),
            HookEvent::Stop => write!(f, "stop"),
            HookEvent::UserPromptSubmit => write!(f, "user-prompt-submit"),
            HookEvent::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Payload delivered with a hook event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked.
    #[serde(default, alias = "toolName", skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Tool arguments. Opaque unless the tool is [`ROUTABLE_TOOL`].
    #[serde(default, alias = "toolInput")]
    pub tool_input: Value,

    /// Project directory of the session.
    #[serde(default, alias = "cwd", skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl HookInput {
    /// Whether this payload is an invocation of the routable tool.
    pub fn is_routable_tool(&self) -> bool {
        self.tool_name.as_deref() == Some(ROUTABLE_TOOL)
    }

    /// Interpret the tool input as a `Task` invocation.
    ///
    /// Returns `None` for other tools or when `subagent_type` is not a
    /// string. Optional fields of the wrong type count as absent.
    pub fn task_input(&self) -> Option<TaskToolInput> {
        if !self.is_routable_tool() {
            return None;
        }

        let fields = self.tool_input.as_object()?;
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Some(TaskToolInput {
            subagent_type: text("subagent_type")?,
            prompt: text("prompt"),
            description: text("description"),
            model: text("model"),
        })
    }
}

/// Arguments of a `Task` tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskToolInput {
    /// Raw agent identifier, optionally `namespace:`-prefixed.
    pub subagent_type: String,

    /// Task prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Short human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Model override for this invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Decision returned to the hook host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// `true` lets the default engine run; `false` means execution was replaced.
    #[serde(rename = "continue")]
    pub continue_: bool,

    /// Substituted output or failure text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Why execution was replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RoutingDecision {
    /// Continue with normal execution.
    pub fn proceed() -> Self {
        Self {
            continue_: true,
            message: None,
            reason: None,
        }
    }

    /// Stop normal execution and show `message` instead.
    pub fn substitute(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            continue_: false,
            message: Some(message.into()),
            reason: Some(reason.into()),
        }
    }

    /// Serialize as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
