//! Codex CLI subprocess engine.
//!
//! Runs the configured Codex command with the prompt on stdin, captures
//! stdout/stderr to per-run log files and enforces the configured timeout.

use super::{AlternateEngine, EngineOutcome, EngineUnavailable};
use crate::config::CodexSettings;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Separator between the agent's registry prompt and the task prompt.
const PROMPT_SEPARATOR: &str = "\n\n---\n\n";

/// Runs routed agents through the Codex CLI.
#[derive(Debug, Clone)]
pub struct CodexEngine {
    settings: CodexSettings,
    working_dir: PathBuf,
    logs_dir: PathBuf,
    agent_prompts: BTreeMap<String, String>,
}

impl CodexEngine {
    /// Create an engine that runs in `working_dir` and logs under `logs_dir`.
    pub fn new(
        settings: CodexSettings,
        working_dir: impl Into<PathBuf>,
        logs_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            settings,
            working_dir: working_dir.into(),
            logs_dir: logs_dir.into(),
            agent_prompts: BTreeMap::new(),
        }
    }

    /// Registry prompt templates, keyed by agent name.
    pub fn with_agent_prompts(mut self, prompts: BTreeMap<String, String>) -> Self {
        self.agent_prompts = prompts;
        self
    }

    /// Build the full argument vector (program first).
    fn build_command_line(&self, model: Option<&str>) -> Result<Vec<String>, EngineUnavailable> {
        let mut args = shell_words::split(&self.settings.command).map_err(|e| {
            EngineUnavailable::new(format!(
                "codex.command '{}' cannot be parsed: {}",
                self.settings.command, e
            ))
        })?;

        if args.is_empty() {
            return Err(EngineUnavailable::new("codex.command is empty"));
        }

        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            args.push(self.settings.model_flag.clone());
            args.push(self.settings.map_model(model).to_string());
        }

        // Prompt is read from stdin.
        args.push("-".to_string());
        Ok(args)
    }

    fn compose_prompt(&self, agent_name: &str, prompt: &str) -> String {
        if !self.settings.include_agent_prompt {
            return prompt.to_string();
        }

        match self.agent_prompts.get(agent_name) {
            Some(template) => format!("{}{}{}", template.trim_end(), PROMPT_SEPARATOR, prompt),
            None => prompt.to_string(),
        }
    }

    fn new_run_dir(&self) -> PathBuf {
        let suffix = Uuid::new_v4().simple().to_string();
        self.logs_dir.join(format!(
            "{}-{}",
            Utc::now().format("%Y%m%dT%H%M%S"),
            &suffix[..8]
        ))
    }
}

impl AlternateEngine for CodexEngine {
    fn execute(
        &self,
        agent_name: &str,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<EngineOutcome, EngineUnavailable> {
        let command_line = self.build_command_line(model)?;
        let full_prompt = self.compose_prompt(agent_name, prompt);

        let run_dir = self.new_run_dir();
        let logs = match RunLogs::create(&run_dir, &full_prompt) {
            Ok(logs) => logs,
            Err(error) => {
                return Ok(EngineOutcome::Failed {
                    output: String::new(),
                    error,
                });
            }
        };

        let program = &command_line[0];
        let mut command = Command::new(program);
        command
            .args(&command_line[1..])
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(logs.stdout))
            .stderr(Stdio::from(logs.stderr));

        for (key, value) in &self.settings.environment {
            command.env(key, value);
        }

        debug!(agent = agent_name, command = ?command_line, run_dir = %run_dir.display(), "spawning codex");

        let start_time = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            EngineUnavailable::new(format!(
                "Codex CLI not available: failed to launch '{}': {}\n\
                 Fix: install the Codex CLI or point codex.command in config.yaml at it.",
                program, e
            ))
        })?;

        // Feed stdin from a separate thread so a child that never reads
        // cannot block us past the timeout.
        let writer = child.stdin.take().map(|mut stdin| {
            let payload = full_prompt.into_bytes();
            thread::spawn(move || {
                let _ = stdin.write_all(&payload);
            })
        });

        let timeout = Duration::from_secs(self.settings.timeout_seconds);
        let waited = wait_with_timeout(&mut child, timeout);

        if let Some(handle) = writer {
            let _ = handle.join();
        }

        let (exit_code, timed_out) = match waited {
            Ok(result) => result,
            Err(e) => {
                kill_process(&mut child);
                return Ok(EngineOutcome::Failed {
                    output: String::new(),
                    error: format!("failed to check Codex process status: {}", e),
                });
            }
        };

        debug!(
            agent = agent_name,
            ?exit_code,
            timed_out,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "codex finished"
        );

        let stdout = read_log(&logs.stdout_path);
        let stderr = read_log(&logs.stderr_path);

        if timed_out {
            return Ok(EngineOutcome::Failed {
                output: stdout,
                error: format!(
                    "Codex timeout after {}",
                    describe_timeout(self.settings.timeout_seconds)
                ),
            });
        }

        match exit_code {
            Some(0) => Ok(EngineOutcome::Completed {
                output: stdout.trim().to_string(),
            }),
            Some(code) => Ok(EngineOutcome::Failed {
                output: stdout,
                error: exit_error(&format!("Codex exited with code {}", code), &stderr),
            }),
            None => Ok(EngineOutcome::Failed {
                output: stdout,
                error: exit_error("Codex was terminated by a signal", &stderr),
            }),
        }
    }
}

/// Open log files for one run.
struct RunLogs {
    stdout: File,
    stderr: File,
    stdout_path: PathBuf,
    stderr_path: PathBuf,
}

impl RunLogs {
    fn create(run_dir: &Path, prompt: &str) -> Result<Self, String> {
        fs::create_dir_all(run_dir).map_err(|e| {
            format!(
                "failed to create Codex log directory '{}': {}",
                run_dir.display(),
                e
            )
        })?;

        let prompt_path = run_dir.join("prompt.md");
        fs::write(&prompt_path, prompt).map_err(|e| {
            format!(
                "failed to write prompt file '{}': {}",
                prompt_path.display(),
                e
            )
        })?;

        let stdout_path = run_dir.join("stdout.log");
        let stderr_path = run_dir.join("stderr.log");

        let stdout = File::create(&stdout_path).map_err(|e| {
            format!(
                "failed to create stdout log '{}': {}",
                stdout_path.display(),
                e
            )
        })?;
        let stderr = File::create(&stderr_path).map_err(|e| {
            format!(
                "failed to create stderr log '{}': {}",
                stderr_path.display(),
                e
            )
        })?;

        Ok(Self {
            stdout,
            stderr,
            stdout_path,
            stderr_path,
        })
    }
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<(Option<i32>, bool)> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait()? {
            Some(status) => return Ok((status.code(), false)),
            None => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok((None, true));
                }
                thread::sleep(poll_interval);
            }
        }
    }
}

/// Kill a process and wait for it to terminate.
fn kill_process(child: &mut Child) {
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

fn read_log(path: &Path) -> String {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn exit_error(summary: &str, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        summary.to_string()
    } else {
        format!("{}: {}", summary, stderr)
    }
}

/// Render a timeout as whole minutes when possible, else seconds.
fn describe_timeout(seconds: u64) -> String {
    let (value, unit) = if seconds >= 60 && seconds % 60 == 0 {
        (seconds / 60, "minute")
    } else {
        (seconds, "second")
    };
    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
