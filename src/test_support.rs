use crate::agent::AgentsConfig;
use crate::engine::{AlternateEngine, EngineOutcome, EngineUnavailable};
use crate::error::{Result, RouteError};
use crate::tracker::BackgroundTaskRegistrar;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

pub(crate) type EngineCall = (String, String, Option<String>);

/// Engine double that returns a fixed response and records every call.
pub(crate) struct ScriptedEngine {
    response: std::result::Result<EngineOutcome, EngineUnavailable>,
    calls: RefCell<Vec<EngineCall>>,
}

impl ScriptedEngine {
    pub(crate) fn completing(output: &str) -> Self {
        Self::with_response(Ok(EngineOutcome::Completed {
            output: output.to_string(),
        }))
    }

    pub(crate) fn failing(output: &str, error: &str) -> Self {
        Self::with_response(Ok(EngineOutcome::Failed {
            output: output.to_string(),
            error: error.to_string(),
        }))
    }

    pub(crate) fn unavailable(message: &str) -> Self {
        Self::with_response(Err(EngineUnavailable::new(message)))
    }

    fn with_response(response: std::result::Result<EngineOutcome, EngineUnavailable>) -> Self {
        Self {
            response,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }
}

impl AlternateEngine for ScriptedEngine {
    fn execute(
        &self,
        agent_name: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> std::result::Result<EngineOutcome, EngineUnavailable> {
        self.calls.borrow_mut().push((
            agent_name.to_string(),
            prompt.to_string(),
            model.map(str::to_string),
        ));
        self.response.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Registration {
    pub task_id: String,
    pub description: String,
    pub agent_name: String,
    pub directory: Option<String>,
}

/// Registrar double that records registrations, optionally failing each one.
#[derive(Default)]
pub(crate) struct RecordingRegistrar {
    registrations: RefCell<Vec<Registration>>,
    fail: bool,
}

impl RecordingRegistrar {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn registrations(&self) -> Vec<Registration> {
        self.registrations.borrow().clone()
    }
}

impl BackgroundTaskRegistrar for RecordingRegistrar {
    fn register(
        &self,
        task_id: &str,
        description: &str,
        agent_name: &str,
        directory: Option<&str>,
    ) -> Result<()> {
        self.registrations.borrow_mut().push(Registration {
            task_id: task_id.to_string(),
            description: description.to_string(),
            agent_name: agent_name.to_string(),
            directory: directory.map(str::to_string),
        });
        if self.fail {
            return Err(RouteError::StateError("tracker unavailable".to_string()));
        }
        Ok(())
    }
}

/// Registry with the agents used throughout the routing tests.
pub(crate) fn sample_registry() -> AgentsConfig {
    AgentsConfig::from_yaml(
        r#"
agents:
  architect-codex:
    description: Architecture analysis on Codex
    prompt: You are a software architect.
    model: gpt-5-codex
    execution_type: codex
  planner-codex:
    description: Planning on Codex
    prompt: You are a planner.
    default_model: gpt-5
    execution_type: codex
  critic-codex:
    description: Plan review on Codex
    prompt: You are a critic.
    execution_type: codex
  architect:
    description: Architecture analysis
    prompt: You are a software architect.
    model: opus
  executor:
    description: Implementation
    prompt: You implement tasks.
    model: sonnet
"#,
    )
    .unwrap()
}
