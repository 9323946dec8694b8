//! Exit code constants for the taskroute CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config or registry)
//! - 2: Alternate engine unavailable (the hook host treats this as blocking)
//! - 3: Background task state could not be read or written

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, malformed hook payload, invalid config.
pub const USER_ERROR: i32 = 1;

/// The Codex CLI could not be launched at all.
pub const ENGINE_UNAVAILABLE: i32 = 2;

/// Background task state file failure.
pub const STATE_FAILURE: i32 = 3;
