//! Configuration model for taskroute.
//!
//! This module defines the Config struct that represents `.taskroute/config.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{CodexSettings, TrackerSettings};
