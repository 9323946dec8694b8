//! Error types for the taskroute CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::engine::EngineUnavailable;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for taskroute operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum RouteError {
    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// `config.yaml` or `agents.yaml` could not be read or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Background task or event state could not be read or written.
    #[error("State error: {0}")]
    StateError(String),

    /// The alternate engine could not be invoked at all.
    #[error(transparent)]
    EngineUnavailable(#[from] EngineUnavailable),
}

impl RouteError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RouteError::UserError(_) => exit_codes::USER_ERROR,
            RouteError::ConfigError(_) => exit_codes::USER_ERROR,
            RouteError::StateError(_) => exit_codes::STATE_FAILURE,
            RouteError::EngineUnavailable(_) => exit_codes::ENGINE_UNAVAILABLE,
        }
    }
}

/// Result type alias for taskroute operations.
pub type Result<T> = std::result::Result<T, RouteError>;
