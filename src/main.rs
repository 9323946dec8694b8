//! taskroute: pre-tool-use hook that routes designated sub-agents through
//! the Codex CLI.
//!
//! This is the main entry point for the `taskroute` CLI. It sets up logging,
//! parses arguments, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod agent;
mod cli;
mod commands;
mod config;
mod context;
mod engine;
mod error;
mod events;
mod exit_codes;
mod fs;
mod hook;
mod tracker;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "TASKROUTE_LOG";

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // stdout carries the hook decision; diagnostics go to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
