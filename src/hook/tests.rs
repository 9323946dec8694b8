use super::*;
use crate::engine::{ENGINE_ERROR_REASON, EngineUnavailable};
use crate::test_support::{RecordingRegistrar, ScriptedEngine, sample_registry};
use regex::Regex;
use serde_json::json;

fn task_input(tool_input: serde_json::Value) -> HookInput {
    HookInput {
        tool_name: Some(ROUTABLE_TOOL.to_string()),
        tool_input,
        directory: Some("/test/dir".to_string()),
    }
}

#[test]
fn test_routes_namespaced_codex_agent() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("Codex analysis result");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "oh-my-claude-sisyphus:architect-codex",
        "prompt": "Analyze the architecture",
        "description": "Architecture analysis",
        "model": "opus"
    }));
    let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert!(!decision.continue_);
    assert_eq!(decision.message.as_deref(), Some("Codex analysis result"));
    assert!(decision.reason.as_deref().unwrap().contains("Codex CLI"));
    assert_eq!(
        engine.calls(),
        vec![(
            "architect-codex".to_string(),
            "Analyze the architecture".to_string(),
            Some("opus".to_string())
        )]
    );
    assert!(registrar.registrations().is_empty());
}

#[test]
fn test_default_model_used_without_override() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("Plan created");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "planner-codex",
        "prompt": "Create a plan"
    }));
    let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert!(!decision.continue_);
    assert_eq!(engine.calls()[0].2.as_deref(), Some("gpt-5"));
}

#[test]
fn test_declared_model_beats_default_model() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("ok");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "architect-codex",
        "prompt": "Review"
    }));
    process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert_eq!(engine.calls()[0].2.as_deref(), Some("gpt-5-codex"));
}

#[test]
fn test_soft_failure_is_reported_as_decision() {
    let registry = sample_registry();
    let engine = ScriptedEngine::failing("", "Codex timeout after 5 minutes");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "critic-codex",
        "prompt": "Review plan"
    }));
    let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert!(!decision.continue_);
    assert!(decision.message.as_deref().unwrap().contains("Codex timeout"));
    assert_eq!(decision.reason.as_deref(), Some(ENGINE_ERROR_REASON));
    assert!(engine.calls()[0].2.is_none());
}

#[test]
fn test_unavailable_engine_propagates() {
    let registry = sample_registry();
    let engine = ScriptedEngine::unavailable("Codex CLI not available");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "architect-codex",
        "prompt": "Test"
    }));
    let err = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap_err();

    assert_eq!(err, EngineUnavailable::new("Codex CLI not available"));
    assert!(registrar.registrations().is_empty());
}

#[test]
fn test_regular_agents_continue() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("should not run");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    for agent in ["architect", "oh-my-claude-sisyphus:executor"] {
        let input = task_input(json!({
            "subagent_type": agent,
            "prompt": "Do the work",
            "description": "Task execution"
        }));
        let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();
        assert_eq!(decision, RoutingDecision::proceed());
    }

    assert!(engine.calls().is_empty());
    let agents: Vec<_> = registrar
        .registrations()
        .into_iter()
        .map(|r| r.agent_name)
        .collect();
    assert_eq!(agents, vec!["architect", "executor"]);
}

#[test]
fn test_default_route_registers_background_task() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("unused");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "executor",
        "prompt": "Implement feature",
        "description": "Task execution"
    }));
    process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    let registrations = registrar.registrations();
    assert_eq!(registrations.len(), 1);
    let re = Regex::new(r"^task-\d+-[0-9a-f]{9}$").unwrap();
    assert!(re.is_match(&registrations[0].task_id));
    assert_eq!(registrations[0].description, "Task execution");
    assert_eq!(registrations[0].agent_name, "executor");
    assert_eq!(registrations[0].directory.as_deref(), Some("/test/dir"));
}

#[test]
fn test_missing_description_and_directory() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("unused");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = HookInput {
        directory: None,
        ..task_input(json!({ "subagent_type": "executor" }))
    };
    process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    let registrations = registrar.registrations();
    assert_eq!(registrations[0].description, "");
    assert!(registrations[0].directory.is_none());
}

#[test]
fn test_registrar_failure_still_continues() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("unused");
    let registrar = RecordingRegistrar::failing();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({ "subagent_type": "executor", "prompt": "x" }));
    let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert_eq!(decision, RoutingDecision::proceed());
    assert_eq!(registrar.registrations().len(), 1);
}

#[test]
fn test_codex_suffix_without_designation_is_not_routed() {
    let mut registry = sample_registry();
    registry.agents.insert(
        "fake-codex".to_string(),
        crate::agent::AgentDefinition {
            description: "Looks routable but is not".to_string(),
            prompt: "Fake".to_string(),
            ..Default::default()
        },
    );
    let engine = ScriptedEngine::completing("should not run");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    for agent in ["fake-codex", "unknown-codex"] {
        let input = task_input(json!({ "subagent_type": agent, "prompt": "Test" }));
        let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();
        assert!(decision.continue_);
    }

    assert!(engine.calls().is_empty());
}

#[test]
fn test_missing_prompt_sends_empty_string() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("done");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({ "subagent_type": "architect-codex", "model": "opus" }));
    process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert_eq!(
        engine.calls(),
        vec![(
            "architect-codex".to_string(),
            String::new(),
            Some("opus".to_string())
        )]
    );
}

#[test]
fn test_other_tools_and_events_pass_through() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("unused");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let bash = HookInput {
        tool_name: Some("Bash".to_string()),
        tool_input: json!({ "command": "ls" }),
        directory: None,
    };
    let decision = process_hook(&HookEvent::PreToolUse, &bash, &deps).unwrap();
    assert_eq!(decision, RoutingDecision::proceed());

    let routed = task_input(json!({ "subagent_type": "architect-codex", "prompt": "x" }));
    for event in [
        HookEvent::PostToolUse,
        HookEvent::SessionStart,
        HookEvent::Other("notification".to_string()),
    ] {
        let decision = process_hook(&event, &routed, &deps).unwrap();
        assert_eq!(decision, RoutingDecision::proceed());
    }

    assert!(engine.calls().is_empty());
    assert!(registrar.registrations().is_empty());
}

#[test]
fn test_task_without_subagent_type_passes_through() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("unused");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({ "prompt": "orphan" }));
    let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert_eq!(decision, RoutingDecision::proceed());
    assert!(engine.calls().is_empty());
    assert!(registrar.registrations().is_empty());
}

#[test]
fn test_mistyped_optional_fields_still_route() {
    let registry = sample_registry();
    let engine = ScriptedEngine::completing("routed anyway");
    let registrar = RecordingRegistrar::new();
    let deps = HookDeps {
        registry: &registry,
        engine: &engine,
        registrar: &registrar,
    };

    let input = task_input(json!({
        "subagent_type": "architect-codex",
        "prompt": "x",
        "description": 5,
        "model": ["not", "a", "string"]
    }));
    let decision = process_hook(&HookEvent::PreToolUse, &input, &deps).unwrap();

    assert!(!decision.continue_);
    assert_eq!(decision.message.as_deref(), Some("routed anyway"));
    assert_eq!(
        engine.calls(),
        vec![(
            "architect-codex".to_string(),
            "x".to_string(),
            Some("gpt-5-codex".to_string())
        )]
    );
}

#[test]
fn test_task_input_reads_fields_leniently() {
    let input = task_input(json!({
        "subagent_type": "executor",
        "prompt": 42,
        "description": "Build"
    }));
    let task = input.task_input().unwrap();
    assert_eq!(task.subagent_type, "executor");
    assert_eq!(task.prompt, None);
    assert_eq!(task.description.as_deref(), Some("Build"));

    assert!(task_input(json!({ "subagent_type": 7 })).task_input().is_none());
    assert!(task_input(json!("not an object")).task_input().is_none());
}

#[test]
fn test_hook_event_parse() {
    assert_eq!(HookEvent::parse("pre-tool-use"), HookEvent::PreToolUse);
    assert_eq!(HookEvent::parse("PreToolUse"), HookEvent::PreToolUse);
    assert_eq!(HookEvent::parse("post_tool_use"), HookEvent::PostToolUse);
    assert_eq!(HookEvent::parse("Stop"), HookEvent::Stop);
    assert_eq!(
        HookEvent::parse("notification"),
        HookEvent::Other("notification".to_string())
    );
    assert_eq!(HookEvent::PreToolUse.to_string(), "pre-tool-use");
}

#[test]
fn test_hook_input_accepts_camel_case_payload() {
    let input: HookInput = serde_json::from_str(
        r#"{"toolName":"Task","toolInput":{"subagent_type":"executor","description":"d"},"directory":"/tmp"}"#,
    )
    .unwrap();

    assert!(input.is_routable_tool());
    let task = input.task_input().unwrap();
    assert_eq!(task.subagent_type, "executor");
    assert_eq!(task.description.as_deref(), Some("d"));
    assert_eq!(input.directory.as_deref(), Some("/tmp"));
}

#[test]
fn test_hook_input_accepts_snake_case_and_cwd() {
    let input: HookInput = serde_json::from_str(
        r#"{"tool_name":"Task","tool_input":{"subagent_type":"executor"},"cwd":"/work"}"#,
    )
    .unwrap();

    assert!(input.task_input().is_some());
    assert_eq!(input.directory.as_deref(), Some("/work"));
}

#[test]
fn test_decision_json_shape() {
    assert_eq!(
        RoutingDecision::proceed().to_json().unwrap(),
        r#"{"continue":true}"#
    );

    let json: serde_json::Value =
        serde_json::from_str(&RoutingDecision::substitute("out", "why").to_json().unwrap())
            .unwrap();
    assert_eq!(json, json!({ "continue": false, "message": "out", "reason": "why" }));
}
